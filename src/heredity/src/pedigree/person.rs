/// Dense index of a person within its `Pedigree`. Persons are indexed in lexicographic order of their names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub(crate) usize);

impl PersonId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Recorded mother and father of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parents {
    pub mother: PersonId,
    pub father: PersonId,
}

/// Pedigree member.
/// # Fields:
/// - `name`          : unique name of the person.
/// - `parents`       : `None` if this person is a founder. `Some(parents)` otherwise.
/// - `observed_trait`: evidence. `Some(true|false)` if the person is known to (not) exhibit the trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name          : String,
    pub parents       : Option<Parents>,
    pub observed_trait: Option<bool>,
}

impl Person {
    /// Check whether or not this person is a founder. Returns `true` if `self.parents == None`
    #[inline(always)]
    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }

    /// Check whether a hypothesized trait value is consistent with the evidence gathered on this person.
    /// Persons with an unknown trait agree with any hypothesis.
    #[inline]
    pub fn agrees_with(&self, has_trait: bool) -> bool {
        self.observed_trait.map_or(true, |observed| observed == has_trait)
    }
}
