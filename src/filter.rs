//! Name-substring projection of the contact collection.

use crate::person::Person;

/// Records whose name contains `filter`, case-insensitively, in
/// collection order. An empty filter matches every record; numbers are
/// never searched.
pub fn visible<'a>(contacts: &'a [Person], filter: &str) -> Vec<&'a Person> {
    let needle = filter.to_lowercase();
    contacts
        .iter()
        .filter(|person| person.name.to_lowercase().contains(&needle))
        .collect()
}
