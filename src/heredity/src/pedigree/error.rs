use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PedigreeError {
    #[error("Pedigree does not contain any person")]
    EmptyPedigree,

    #[error("Person {0} is defined more than once")]
    DuplicatePerson(String),

    #[error("Person {person} has a {known} but no {missing}. Parents must either be both specified or both left blank")]
    MissingParent{person: String, known: &'static str, missing: &'static str},

    #[error("Parent {parent} of {person} is not a member of the pedigree")]
    DanglingParent{person: String, parent: String},

    #[error("Person {person} has the same mother and father: {parent}. Mother and father must be two distinct members of the pedigree")]
    SameParents{person: String, parent: String},

    #[error("Cyclic parentage: {0} is its own ancestor")]
    CyclicParentage(String),

    #[error("Person names cannot be blank")]
    BlankName,

    #[error("Invalid person name '{0}'. Names cannot contain tabulations or a '-' surrounded by spaces")]
    ReservedCharacters(String),
}
