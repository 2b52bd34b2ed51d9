use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace};

use super::{Pedigree, PedigreeError, Person, PersonId, Parents};

/// Raw, unvalidated definition of a pedigree member.
#[derive(Debug, Clone)]
struct PendingPerson {
    mother        : Option<String>,
    father        : Option<String>,
    observed_trait: Option<bool>,
}

/// Incrementally collect person definitions, and validate them into a `Pedigree`.
///
/// ```
/// use heredity::Pedigree;
/// let mut builder = Pedigree::builder();
/// builder.add_person("James", None, None, Some(true)).unwrap();
/// builder.add_person("Lily", None, None, Some(false)).unwrap();
/// builder.add_person("Harry", Some("Lily"), Some("James"), None).unwrap();
/// let pedigree = builder.build().unwrap();
/// assert_eq!(pedigree.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PedigreeBuilder {
    pending: BTreeMap<String, PendingPerson>,
}

impl PedigreeBuilder {
    /// Register a new person. Parent references are only resolved when calling `build()`, so persons may be added
    /// in any order.
    ///
    /// # Errors
    /// - `PedigreeError::BlankName` if `name` is empty.
    /// - `PedigreeError::ReservedCharacters` if `name` contains a field separator of the tabulated output
    ///   (`'\t'`, or `" - "`).
    /// - `PedigreeError::DuplicatePerson` if a person with the same name was already added.
    pub fn add_person(&mut self, name: &str, mother: Option<&str>, father: Option<&str>, observed_trait: Option<bool>) -> Result<&mut Self, PedigreeError> {
        if name.trim().is_empty() {
            return Err(PedigreeError::BlankName)
        }

        if name.contains('\t') || name.contains(" - ") {
            return Err(PedigreeError::ReservedCharacters(name.to_string()))
        }

        if self.pending.contains_key(name) {
            return Err(PedigreeError::DuplicatePerson(name.to_string()))
        }

        let person = PendingPerson{
            mother: mother.map(str::to_string),
            father: father.map(str::to_string),
            observed_trait
        };
        self.pending.insert(name.to_string(), person);
        Ok(self)
    }

    /// Validate every person definition and return an immutable `Pedigree`.
    ///
    /// # Errors
    /// - `EmptyPedigree`   if no person was ever added.
    /// - `MissingParent`   if a person has exactly one of mother/father specified.
    /// - `DanglingParent`  if a parent is not a member of the pedigree.
    /// - `SameParents`     if a person's mother and father are the same person.
    /// - `CyclicParentage` if any person is its own ancestor.
    pub fn build(self) -> Result<Pedigree, PedigreeError> {
        use PedigreeError::{EmptyPedigree, MissingParent, DanglingParent, SameParents};
        if self.pending.is_empty() {
            return Err(EmptyPedigree)
        }

        // ---- Persons are indexed following the lexicographic order of their names.
        let ids: BTreeMap<String, PersonId> = self.pending.keys()
            .enumerate()
            .map(|(i, name)| (name.clone(), PersonId(i)))
            .collect();

        // ---- Resolve parent references.
        let resolve = |person: &str, parent: &str| {
            ids.get(parent).copied().ok_or_else(|| DanglingParent{person: person.to_string(), parent: parent.to_string()})
        };

        let mut persons = Vec::with_capacity(self.pending.len());
        for (name, pending) in self.pending {
            let parents = match (pending.mother.as_deref(), pending.father.as_deref()) {
                (None, None)                 => None,
                (Some(_), None)              => return Err(MissingParent{person: name, known: "mother", missing: "father"}),
                (None, Some(_))              => return Err(MissingParent{person: name, known: "father", missing: "mother"}),
                (Some(mother), Some(father)) => {
                    if mother == father {
                        return Err(SameParents{person: name, parent: mother.to_string()})
                    }
                    Some(Parents{mother: resolve(&name, mother)?, father: resolve(&name, father)?})
                }
            };
            persons.push(Person{name, parents, observed_trait: pending.observed_trait});
        }

        Self::check_acyclic(&persons)?;

        let pedigree = Pedigree{persons, ids};
        debug!("Validated pedigree of {} persons ({} founders)", pedigree.len(), pedigree.founders().count());
        trace!("\n{pedigree}");
        Ok(pedigree)
    }

    /// Ensure no person is its own ancestor. Performs a topological sort of the parent -> child relation
    /// (Kahn's algorithm): any person left unvisited once the queue runs dry belongs to, or descends from, a cycle.
    fn check_acyclic(persons: &[Person]) -> Result<(), PedigreeError> {
        // ---- Number of parents not yet visited, and reverse adjacency list of each person.
        let mut remaining_parents = vec![0usize; persons.len()];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); persons.len()];
        for (i, person) in persons.iter().enumerate() {
            if let Some(Parents{mother, father}) = person.parents {
                remaining_parents[i] = 2;
                children[mother.index()].push(i);
                children[father.index()].push(i);
            }
        }

        // ---- Visit founders first, then release each child once both of its parents have been visited.
        let mut queue: VecDeque<usize> = (0..persons.len()).filter(|i| remaining_parents[*i] == 0).collect();
        let mut visited = 0;
        while let Some(i) = queue.pop_front() {
            visited += 1;
            for &child in &children[i] {
                remaining_parents[child] -= 1;
                if remaining_parents[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        if visited == persons.len() {
            return Ok(())
        }

        // ---- Report the first person still waiting on a parent that actually lies on a cycle.
        let culprit = Self::find_cycle_member(persons, &remaining_parents);
        Err(PedigreeError::CyclicParentage(persons[culprit].name.clone()))
    }

    /// Walk up the unvisited ancestry of any unvisited person until a person is met twice.
    /// Every unvisited person has at least one unvisited parent, so the walk cannot escape the unvisited set.
    fn find_cycle_member(persons: &[Person], remaining_parents: &[usize]) -> usize {
        let unvisited = |i: usize| remaining_parents[i] > 0;
        let mut seen = vec![false; persons.len()];
        let mut current = (0..persons.len()).find(|i| unvisited(*i)).unwrap_or_default();
        while !seen[current] {
            seen[current] = true;
            let Some(Parents{mother, father}) = persons[current].parents else {
                break
            };
            current = if unvisited(mother.index()) { mother.index() } else { father.index() };
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(def: &[(&str, Option<&str>, Option<&str>)]) -> Result<Pedigree, PedigreeError> {
        let mut builder = PedigreeBuilder::default();
        for (name, mother, father) in def {
            builder.add_person(name, *mother, *father, None)?;
        }
        builder.build()
    }

    #[test]
    fn persons_are_sorted_by_name() -> Result<(), PedigreeError> {
        let pedigree = build(&[("Lily", None, None), ("James", None, None), ("Harry", Some("Lily"), Some("James"))])?;
        let names: Vec<&str> = pedigree.iter().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, vec!["Harry", "James", "Lily"]);

        let harry = pedigree.person(pedigree.id_of("Harry").expect("Harry"));
        let parents = harry.parents.expect("Harry should have parents");
        assert_eq!(pedigree.person(parents.mother).name, "Lily");
        assert_eq!(pedigree.person(parents.father).name, "James");
        assert_eq!(pedigree.founders().count(), 2);
        assert_eq!(pedigree.offsprings().count(), 1);
        Ok(())
    }

    #[test]
    fn empty_pedigree() {
        assert_eq!(build(&[]), Err(PedigreeError::EmptyPedigree));
    }

    #[test]
    fn duplicate_person() {
        let err = build(&[("Harry", None, None), ("Harry", None, None)]).unwrap_err();
        assert_eq!(err, PedigreeError::DuplicatePerson("Harry".to_string()));
    }

    #[test]
    fn blank_name() {
        assert_eq!(build(&[("  ", None, None)]), Err(PedigreeError::BlankName));
    }

    #[test]
    fn reserved_characters() {
        for name in ["Mary - Jane", "Mary   -  Jane", "Mary\tJane"] {
            assert_eq!(build(&[(name, None, None)]), Err(PedigreeError::ReservedCharacters(name.to_string())));
        }
        assert!(build(&[("Mary-Jane", None, None), ("Mary -Jane", None, None)]).is_ok());
    }

    #[test]
    fn single_parent() {
        let err = build(&[("Lily", None, None), ("Harry", Some("Lily"), None)]).unwrap_err();
        assert!(matches!(err, PedigreeError::MissingParent{known: "mother", missing: "father", ..}));

        let err = build(&[("James", None, None), ("Harry", None, Some("James"))]).unwrap_err();
        assert!(matches!(err, PedigreeError::MissingParent{known: "father", missing: "mother", ..}));
    }

    #[test]
    fn dangling_parent() {
        let err = build(&[("Lily", None, None), ("Harry", Some("Lily"), Some("James"))]).unwrap_err();
        assert_eq!(err, PedigreeError::DanglingParent{person: "Harry".to_string(), parent: "James".to_string()});
    }

    #[test]
    fn same_parents() {
        let err = build(&[("Lily", None, None), ("Harry", Some("Lily"), Some("Lily"))]).unwrap_err();
        assert!(matches!(err, PedigreeError::SameParents{..}));
        assert!(err.to_string().contains("two distinct members"), "{err}");
    }

    #[test]
    fn own_parent() {
        let err = build(&[("Lily", None, None), ("Harry", Some("Lily"), Some("Harry"))]).unwrap_err();
        assert_eq!(err, PedigreeError::CyclicParentage("Harry".to_string()));
    }

    #[test]
    fn cyclic_ancestry() {
        // A <- B <- C <- A, with a descendant D hanging off the cycle.
        let err = build(&[
            ("X", None, None),
            ("A", Some("X"), Some("C")),
            ("B", Some("X"), Some("A")),
            ("C", Some("X"), Some("B")),
            ("D", Some("X"), Some("C")),
        ]).unwrap_err();
        match err {
            PedigreeError::CyclicParentage(name) => assert!(["A", "B", "C"].contains(&name.as_str()), "{name}"),
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[test]
    fn deep_acyclic_pedigree() -> Result<(), PedigreeError> {
        let pedigree = build(&[
            ("F1.1", None, None),
            ("F1.2", None, None),
            ("F1.3", None, None),
            ("F2.1", None, None),
            ("O2.2", Some("F1.1"), Some("F1.2")),
            ("O2.3", Some("F1.1"), Some("F1.2")),
            ("F2.4", None, None),
            ("O2.5", Some("F1.2"), Some("F1.3")),
            ("O3.1", Some("F2.1"), Some("O2.2")),
            ("O3.2", Some("O2.3"), Some("F2.4")),
        ])?;
        assert_eq!(pedigree.len(), 10);
        assert_eq!(pedigree.founders().count(), 5);
        Ok(())
    }
}
