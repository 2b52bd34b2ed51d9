use crate::pedigree::Pedigree;

/// Mock a pedigree made of a single founder, with an optional observed trait.
/// # Arguments:
/// - `label`: name of the individual (e.g. "father", "mother", etc.)
pub(crate) fn mock_founder_pedigree(label: &str, observed_trait: Option<bool>) -> Pedigree {
    let mut builder = Pedigree::builder();
    builder.add_person(label, None, None, observed_trait).expect("Founder should be includable");
    builder.build().expect("Single founder pedigree should be valid")
}

/// Mock an offspring, along with its two founder parents.
/// # Arguments:
/// - `label`  : name of the offspring (e.g. "child")
/// - `parents`: names of the parents (`[mother, father]`). Defaults to `["mother", "father"]`
/// - `traits` : observed traits of `[mother, father, offspring]`
pub(crate) fn mock_offspring_pedigree(label: &str, parents: Option<[&str; 2]>, traits: [Option<bool>; 3]) -> Pedigree {
    let [mother, father] = parents.unwrap_or(["mother", "father"]);
    let mut builder = Pedigree::builder();
    builder.add_person(mother, None, None, traits[0]).expect("Mother should be includable");
    builder.add_person(father, None, None, traits[1]).expect("Father should be includable");
    builder.add_person(label, Some(mother), Some(father), traits[2]).expect("Offspring should be includable");
    builder.build().expect("Offspring pedigree should be valid")
}

/// Mock the three-generation pedigree of a grandchild, whose mother descends from two founders and whose father
/// is a founder.
pub(crate) fn mock_three_generations_pedigree() -> Pedigree {
    let mut builder = Pedigree::builder();
    builder.add_person("Arthur", None, None, Some(false)).expect("Arthur");
    builder.add_person("Molly", None, None, None).expect("Molly");
    builder.add_person("Ron", Some("Molly"), Some("Arthur"), None).expect("Ron");
    builder.add_person("Hermione", None, None, Some(false)).expect("Hermione");
    builder.add_person("Rose", Some("Hermione"), Some("Ron"), Some(true)).expect("Rose");
    builder.build().expect("Three generations pedigree should be valid")
}
