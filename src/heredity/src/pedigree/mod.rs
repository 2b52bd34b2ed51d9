use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

mod person;
pub use person::{Person, PersonId, Parents};

mod builder;
pub use builder::PedigreeBuilder;

mod error;
pub use error::PedigreeError;

#[cfg(test)] pub(crate) mod tests;

/// Space padding lengths used for `std::fmt::Display` of Pedigree
const NAME_DISPLAY_LEN   : usize = 10;
const PARENTS_DISPLAY_LEN: usize = 25;

/// A validated, immutable family tree.
/// # Fields:
/// - `persons`: every member of the pedigree, sorted by name. `persons[i]` is the person of `PersonId(i)`
/// - `ids`    : name -> `PersonId` lookup table.
///
/// # Invariants (enforced by `PedigreeBuilder::build()`):
/// - the pedigree is non-empty, and names are unique.
/// - parents are either both recorded or both absent, distinct, and members of the pedigree.
/// - the parent relation is acyclic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pedigree {
    persons: Vec<Person>,
    ids    : BTreeMap<String, PersonId>,
}

impl Pedigree {
    /// Instantiate a new `PedigreeBuilder`.
    pub fn builder() -> PedigreeBuilder {
        PedigreeBuilder::default()
    }

    /// Number of persons within this pedigree.
    #[inline]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Always `false` for a validated pedigree.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Access a person through its id.
    /// # Panics
    /// - if `id` does not belong to this pedigree.
    #[inline]
    pub fn person(&self, id: PersonId) -> &Person {
        &self.persons[id.index()]
    }

    /// Retrieve the id of a person, given its name.
    pub fn id_of(&self, name: &str) -> Option<PersonId> {
        self.ids.get(name).copied()
    }

    /// Iterate over every person of the pedigree, in order of their `PersonId`.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Person)> + '_ {
        self.persons.iter().enumerate().map(|(i, person)| (PersonId(i), person))
    }

    /// Iterate over every person without recorded parents.
    pub fn founders(&self) -> impl Iterator<Item = &Person> + '_ {
        self.persons.iter().filter(|person| person.is_founder())
    }

    /// Iterate over every person with recorded parents.
    pub fn offsprings(&self) -> impl Iterator<Item = &Person> + '_ {
        self.persons.iter().filter(|person| !person.is_founder())
    }

    /// Number of persons whose trait is not observed.
    pub fn unobserved(&self) -> usize {
        self.persons.iter().filter(|person| person.observed_trait.is_none()).count()
    }

    /// Check whether a complete trait assignment is consistent with every observed trait.
    /// `traits[i]` is the hypothesized trait of `PersonId(i)`.
    pub fn agrees_with(&self, traits: &[bool]) -> bool {
        self.persons.iter().zip(traits).all(|(person, has_trait)| person.agrees_with(*has_trait))
    }
}

impl Display for Pedigree {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for person in &self.persons {
            let parents = match person.parents {
                None => "None".to_string(),
                Some(Parents{mother, father}) => format!("{} <-> {}", self.person(mother).name, self.person(father).name)
            };
            let observed = match person.observed_trait {
                Some(true)  => "1",
                Some(false) => "0",
                None        => "?"
            };
            writeln!(f, "name: {: <NAME_DISPLAY_LEN$} - parents: {: <PARENTS_DISPLAY_LEN$} - trait: {observed}", person.name, parents)?;
        }
        Ok(())
    }
}
