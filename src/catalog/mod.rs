//! Language catalog: display names, aliases and execution identifiers.

mod data;

use std::fmt;

use crate::error::InputError;

/// One language (or compiler/runtime variant of a language) the service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    pub name: &'static str,
    /// Key the execution service knows the language by.
    pub id: &'static str,
    /// Compiler or runtime variants, preferred first.
    pub variants: &'static [&'static str],
}

impl LanguageEntry {
    pub fn variant(&self) -> Option<&'static str> {
        self.variants.first().copied()
    }
}

impl fmt::Display for LanguageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant() {
            Some(v) => write!(f, "{} ({})", self.name, v),
            None => f.write_str(self.name),
        }
    }
}

/// Immutable lookup table over a static language list and alias list.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [LanguageEntry],
    aliases: &'static [(&'static str, &'static str)],
}

static BUNDLED: Catalog = Catalog::new(data::LANGUAGES, data::ALIASES);

impl Catalog {
    pub const fn new(
        entries: &'static [LanguageEntry],
        aliases: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { entries, aliases }
    }

    /// The table shipped with the binary.
    pub fn bundled() -> &'static Catalog {
        &BUNDLED
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks a language up by display name, `Name (variant)`, identifier or
    /// built-in alias, in that order. Matching ignores ASCII case.
    pub fn resolve(&self, name: &str) -> Result<&'static LanguageEntry, InputError> {
        let needle = name.trim();
        let entries = self.entries;

        if let Some(e) = entries.iter().find(|e| e.name.eq_ignore_ascii_case(needle)) {
            return Ok(e);
        }
        if let Some(e) = split_variant(needle).and_then(|(base, variant)| {
            entries.iter().find(|e| {
                e.name.eq_ignore_ascii_case(base)
                    && e.variants.iter().any(|v| v.eq_ignore_ascii_case(variant))
            })
        }) {
            return Ok(e);
        }
        if let Some(e) = self.by_id(needle) {
            return Ok(e);
        }
        self.alias_target(needle)
            .and_then(|id| self.by_id(id))
            .ok_or_else(|| InputError::UnknownLanguage(needle.to_string()))
    }

    pub fn by_id(&self, id: &str) -> Option<&'static LanguageEntry> {
        self.entries.iter().find(|e| e.id.eq_ignore_ascii_case(id))
    }

    pub fn alias_target(&self, alias: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(a, _)| a.eq_ignore_ascii_case(alias))
            .map(|(_, id)| *id)
    }

    /// Entries reachable by a name starting with `prefix`, sorted by name.
    ///
    /// Every form [`Catalog::resolve`] accepts is matched: display name,
    /// `Name (variant)`, identifier and built-in alias.
    pub fn filter(&self, prefix: &str) -> Vec<&'static LanguageEntry> {
        let prefix = prefix.trim().to_lowercase();
        let mut out: Vec<&'static LanguageEntry> = self
            .entries
            .iter()
            .filter(|e| self.names_of(e).any(|n| n.to_lowercase().starts_with(&prefix)))
            .collect();
        out.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(b.id))
        });
        out
    }

    fn names_of<'a>(&'a self, e: &'a LanguageEntry) -> impl Iterator<Item = String> + 'a {
        let variants = e.variants.iter().map(move |v| format!("{} ({v})", e.name));
        let aliases = self
            .aliases
            .iter()
            .filter(move |(_, id)| *id == e.id)
            .map(|(a, _)| a.to_string());
        [e.name.to_string(), e.id.to_string()]
            .into_iter()
            .chain(variants)
            .chain(aliases)
    }

    /// Built-in aliases starting with `prefix`, sorted by alias.
    pub fn aliases_with_prefix(&self, prefix: &str) -> Vec<(&'static str, &'static str)> {
        let prefix = prefix.trim().to_lowercase();
        let mut out: Vec<_> = self
            .aliases
            .iter()
            .filter(|(a, _)| a.starts_with(&prefix))
            .copied()
            .collect();
        out.sort();
        out
    }
}

fn split_variant(s: &str) -> Option<(&str, &str)> {
    let (base, rest) = s.rsplit_once('(')?;
    let variant = rest.strip_suffix(')')?;
    Some((base.trim_end(), variant.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_display_name_ignoring_case() {
        let e = Catalog::bundled().resolve("pYtHoN").unwrap();
        assert_eq!(e.id, "python");
    }

    #[test]
    fn ambiguous_name_picks_first_variant() {
        let cat = Catalog::bundled();
        assert_eq!(cat.resolve("C#").unwrap().id, "csharp.net");
        assert_eq!(cat.resolve("c# (mono)").unwrap().id, "csharp");
        assert_eq!(cat.resolve("JavaScript (deno)").unwrap().id, "deno");
    }

    #[test]
    fn resolves_identifier_and_alias() {
        let cat = Catalog::bundled();
        assert_eq!(cat.resolve("c++").unwrap().name, "C++");
        assert_eq!(cat.resolve("cpp").unwrap().id, "c++");
        assert_eq!(cat.resolve("cs").unwrap().id, "csharp.net");
        assert_eq!(cat.resolve("  rs ").unwrap().id, "rust");
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = Catalog::bundled().resolve("klingon").unwrap_err();
        assert_eq!(err, InputError::UnknownLanguage("klingon".into()));
    }

    #[test]
    fn list_py_is_sorted_and_prefix_only() {
        let names: Vec<_> = Catalog::bundled()
            .filter("py")
            .iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Pyth", "Python", "Python 2"]);
    }

    #[test]
    fn filter_includes_whatever_resolve_accepts() {
        let cat = Catalog::bundled();
        let mut names: Vec<String> = Vec::new();
        for e in data::LANGUAGES {
            names.push(e.name.to_string());
            names.push(e.id.to_uppercase());
            names.extend(e.variants.iter().map(|v| format!("{} ({v})", e.name)));
        }
        names.extend(data::ALIASES.iter().map(|(a, _)| a.to_string()));

        for name in &names {
            let resolved = cat.resolve(name).unwrap();
            assert!(
                cat.filter(name).iter().any(|f| f.id == resolved.id),
                "{name} -> {}",
                resolved.id
            );
        }
    }

    #[test]
    fn filter_reaches_entries_through_ids_and_aliases() {
        let cat = Catalog::bundled();
        let ids = |prefix: &str| cat.filter(prefix).iter().map(|e| e.id).collect::<Vec<_>>();
        assert!(ids("cs").contains(&"csharp.net"));
        assert!(ids("rs").contains(&"rust"));
        assert_eq!(ids("csharp.net"), ["csharp.net"]);
        assert_eq!(ids("C# (mono)"), ["csharp"]);
    }

    #[test]
    fn identifiers_are_unique() {
        let mut ids: Vec<_> = data::LANGUAGES.iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), data::LANGUAGES.len());
    }

    #[test]
    fn every_alias_points_at_a_language() {
        let cat = Catalog::bundled();
        for (alias, id) in data::ALIASES {
            assert!(cat.by_id(id).is_some(), "{alias} -> {id}");
        }
    }

    #[test]
    fn custom_tables_work() {
        static ENTRIES: &[LanguageEntry] = &[LanguageEntry { name: "Toy", id: "toy-1", variants: &[] }];
        static ALIASES: &[(&str, &str)] = &[("t", "toy-1")];
        let cat = Catalog::new(ENTRIES, ALIASES);
        assert_eq!(cat.resolve("t").unwrap().to_string(), "Toy");
        assert_eq!(cat.len(), 1);
    }
}
