//! Sequential placeholder substitution

use courier_domain::Variable;

/// Replaces every `{{key}}` in `text` with the variable's value.
///
/// Variables are applied one after another in list order, so a value that
/// introduces another placeholder is expanded only by variables that come
/// later in the list. Keys match literally. Placeholders with no matching
/// variable are left as they are.
#[must_use]
pub fn interpolate(text: &str, variables: &[Variable]) -> String {
    variables.iter().fold(text.to_string(), |acc, variable| {
        let placeholder = format!("{{{{{}}}}}", variable.key);
        if acc.contains(&placeholder) {
            acc.replace(&placeholder, &variable.value)
        } else {
            acc
        }
    })
}
