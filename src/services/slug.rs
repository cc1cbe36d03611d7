//! URL slug derivation.

/// Turn an arbitrary display name into a URL slug: lowercase, whitespace
/// runs become a single hyphen, everything outside `[a-z0-9-]` is dropped,
/// hyphen runs collapse, leading/trailing hyphens are trimmed.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_hyphen = true;
    for ch in input.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            if !last_hyphen {
                slug.push('-');
                last_hyphen = true;
            }
            continue;
        }
        for lowered in ch.to_lowercase() {
            if lowered.is_ascii_lowercase() || lowered.is_ascii_digit() {
                slug.push(lowered);
                last_hyphen = false;
            }
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Indian Institute of Technology"), "indian-institute-of-technology");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("Data   Science"), "data-science");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("St. Xavier's College, Mumbai"), "st-xaviers-college-mumbai");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(slugify("  -- MBA --  "), "mba");
    }

    #[test]
    fn collapses_hyphen_runs() {
        assert_eq!(slugify("a - b -- c"), "a-b-c");
    }

    #[test]
    fn empty_when_nothing_survives() {
        assert_eq!(slugify("!!!"), "");
    }
}
