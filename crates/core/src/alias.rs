//! Alias management
//!
//! Aliases are short local names for opaque Galaxy workflow and dataset IDs.
//! They never leave this machine: every command resolves a user-supplied
//! token to an ID before talking to the server, and listings invert the map
//! to show the alias next to each ID.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::ConfigManager;
use crate::error::{Error, Result};

/// Alias name to remote ID
pub type AliasMap = BTreeMap<String, String>;

/// Attempts with a bare `adjective_name` before numeric suffixes are added
const MAX_PLAIN_ATTEMPTS: usize = 100;

const ADJECTIVES: &[&str] = &[
    "admiring", "adoring", "affectionate", "agitated", "amazing", "angry", "awesome",
    "blissful", "bold", "boring", "brave", "busy", "charming", "clever", "cool",
    "compassionate", "competent", "confident", "cranky", "dazzling", "determined",
    "distracted", "dreamy", "eager", "ecstatic", "elastic", "elated", "elegant",
    "eloquent", "epic", "fervent", "festive", "flamboyant", "focused", "friendly",
    "frosty", "gallant", "gifted", "goofy", "gracious", "happy", "hardcore",
    "heuristic", "hopeful", "hungry", "infallible", "inspiring", "jolly", "jovial",
    "keen", "kind", "laughing", "loving", "lucid", "magical", "modest", "musing",
    "mystifying", "naughty", "nervous", "nifty", "nostalgic", "objective",
    "optimistic", "peaceful", "pedantic", "pensive", "practical", "priceless",
    "quirky", "quizzical", "relaxed", "reverent", "romantic", "sad", "serene",
    "sharp", "silly", "sleepy", "stoic", "strange", "stupefied", "suspicious",
    "sweet", "tender", "thirsty", "trusting", "upbeat", "vibrant", "vigilant",
    "vigorous", "wizardly", "wonderful", "xenodochial", "youthful", "zealous",
    "zen",
];

const SCIENTISTS: &[&str] = &[
    "agnesi", "albattani", "archimedes", "babbage", "banach", "bardeen", "bell",
    "blackburn", "bohr", "brattain", "carson", "cerf", "chandrasekhar", "curie",
    "darwin", "davinci", "dijkstra", "einstein", "elion", "engelbart", "euclid",
    "euler", "fermat", "fermi", "feynman", "franklin", "galileo", "gauss",
    "goodall", "haibt", "hamilton", "hawking", "heisenberg", "hodgkin", "hopper",
    "hypatia", "jang", "kepler", "khorana", "kilby", "knuth", "lalande", "lamarr",
    "leakey", "lovelace", "lumiere", "mayer", "mcclintock", "meitner", "mendel",
    "mendeleev", "mirzakhani", "morse", "newton", "nightingale", "nobel", "noether",
    "pare", "pasteur", "perlman", "pike", "poincare", "ptolemy", "ritchie",
    "rosalind", "sammet", "sanger", "shockley", "sinoussi", "stallman", "swanson",
    "tesla", "thompson", "torvalds", "turing", "villani", "volhard", "wescoff",
    "wiles", "williams", "wilson", "wing", "wozniak", "wright", "yalow", "yonath",
];

/// Resolve a user-supplied token to a remote ID
///
/// Returns the aliased ID when `token` is an alias, otherwise `token` itself.
pub fn resolve<'a>(token: &'a str, aliases: &'a AliasMap) -> &'a str {
    aliases.get(token).map(String::as_str).unwrap_or(token)
}

/// Build the remote ID to alias view of an alias map
///
/// When several aliases point at one ID, the lexicographically first alias
/// name is kept.
pub fn invert(aliases: &AliasMap) -> BTreeMap<String, String> {
    let mut inverted = BTreeMap::new();
    for (name, id) in aliases {
        inverted.entry(id.clone()).or_insert_with(|| name.clone());
    }
    inverted
}

/// Generate a random `adjective_scientist` name
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("gallant");
    let scientist = SCIENTISTS.choose(rng).copied().unwrap_or("hopper");
    format!("{adjective}_{scientist}")
}

/// Generate a random alias name that is not already a key of `existing`
pub fn assign_random(existing: &AliasMap) -> String {
    assign_random_with(&mut rand::thread_rng(), existing)
}

fn assign_random_with<R: Rng + ?Sized>(rng: &mut R, existing: &AliasMap) -> String {
    let mut attempts = 0;
    loop {
        let mut name = random_name(rng);
        if attempts >= MAX_PLAIN_ATTEMPTS {
            name = format!("{name}{}", rng.gen_range(1..10_000));
        }
        if !existing.contains_key(&name) {
            return name;
        }
        attempts += 1;
    }
}

/// Assign a fresh alias to every ID that has none yet
///
/// IDs already present as a value of `existing` are skipped, so existing
/// aliases are never overwritten. Returns the new ID to alias pairs.
pub fn bulk_assign<I, S>(ids: I, existing: &AliasMap) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut working = existing.clone();
    let mut assigned = BTreeMap::new();

    for id in ids {
        let id = id.as_ref();
        if working.values().any(|v| v == id) {
            continue;
        }
        let name = assign_random(&working);
        working.insert(name.clone(), id.to_string());
        assigned.insert(id.to_string(), name);
    }

    assigned
}

/// Manager for alias operations backed by the config file
pub struct AliasManager {
    config_manager: ConfigManager,
}

impl AliasManager {
    /// Create a new AliasManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// List all aliases
    pub fn list(&self) -> Result<AliasMap> {
        Ok(self.config_manager.load()?.aliases)
    }

    /// Point `name` at `id`, returning the ID it pointed at before, if any
    pub fn set(&self, name: &str, id: &str) -> Result<Option<String>> {
        let mut config = self.config_manager.load()?;
        let previous = config.aliases.insert(name.to_string(), id.to_string());
        self.config_manager.save(&config)?;
        Ok(previous)
    }

    /// Point a freshly generated alias at `id` and return the alias
    pub fn set_random(&self, id: &str) -> Result<String> {
        let mut config = self.config_manager.load()?;
        let name = assign_random(&config.aliases);
        config.aliases.insert(name.clone(), id.to_string());
        self.config_manager.save(&config)?;
        Ok(name)
    }

    /// Alias every ID that has none yet and return the new ID to alias pairs
    pub fn assign_all(&self, ids: &[String]) -> Result<BTreeMap<String, String>> {
        let mut config = self.config_manager.load()?;
        let assigned = bulk_assign(ids, &config.aliases);
        if assigned.is_empty() {
            return Ok(assigned);
        }
        for (id, name) in &assigned {
            config.aliases.insert(name.clone(), id.clone());
        }
        self.config_manager.save(&config)?;
        Ok(assigned)
    }

    /// Remove an alias
    pub fn remove(&self, name: &str) -> Result<String> {
        let mut config = self.config_manager.load()?;
        let id = config
            .aliases
            .remove(name)
            .ok_or_else(|| Error::UnknownAlias(name.to_string()))?;
        self.config_manager.save(&config)?;
        Ok(id)
    }

    /// Remove every alias, returning how many were removed
    pub fn clear(&self) -> Result<usize> {
        let mut config = self.config_manager.load()?;
        let count = config.aliases.len();
        config.aliases.clear();
        self.config_manager.save(&config)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn temp_alias_manager() -> (AliasManager, ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_manager = ConfigManager::with_path(temp_dir.path().join("gxwf.yml"));
        let alias_manager = AliasManager::with_config_manager(config_manager.clone());
        (alias_manager, config_manager, temp_dir)
    }

    fn redfox() -> AliasMap {
        AliasMap::from([("redfox".to_string(), "wf123".to_string())])
    }

    #[test]
    fn test_resolve_alias_and_passthrough() {
        let aliases = redfox();
        assert_eq!(resolve("redfox", &aliases), "wf123");
        assert_eq!(resolve("wf123", &aliases), "wf123");
        assert_eq!(resolve("other", &AliasMap::new()), "other");
    }

    #[test]
    fn test_invert_single() {
        let inverted = invert(&redfox());
        assert_eq!(
            inverted,
            BTreeMap::from([("wf123".to_string(), "redfox".to_string())])
        );
    }

    #[test]
    fn test_invert_tie_break_is_lexicographic() {
        let aliases = AliasMap::from([
            ("zebra".to_string(), "wf1".to_string()),
            ("apple".to_string(), "wf1".to_string()),
            ("mango".to_string(), "wf2".to_string()),
        ]);
        let inverted = invert(&aliases);
        assert_eq!(inverted["wf1"], "apple");
        assert_eq!(inverted["wf2"], "mango");
        assert_eq!(inverted.len(), 2);
    }

    #[test]
    fn test_random_name_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let name = random_name(&mut rng);
        let (adjective, scientist) = name.split_once('_').unwrap();
        assert!(ADJECTIVES.contains(&adjective));
        assert!(SCIENTISTS.contains(&scientist));
    }

    #[test]
    fn test_assign_random_avoids_existing_names() {
        let mut existing = AliasMap::new();
        for _ in 0..500 {
            let name = assign_random(&existing);
            assert!(!existing.contains_key(&name));
            existing.insert(name, "id".to_string());
        }
        assert_eq!(existing.len(), 500);
    }

    #[test]
    fn test_assign_random_when_all_plain_names_taken() {
        let mut existing = AliasMap::new();
        for adjective in ADJECTIVES {
            for scientist in SCIENTISTS {
                existing.insert(format!("{adjective}_{scientist}"), "id".to_string());
            }
        }
        let mut rng = StdRng::seed_from_u64(1);
        let name = assign_random_with(&mut rng, &existing);
        assert!(!existing.contains_key(&name));
    }

    #[test]
    fn test_bulk_assign_skips_aliased_ids() {
        let existing = redfox();
        let assigned = bulk_assign(["wf123", "ds1", "ds2", "ds1"], &existing);

        assert!(!assigned.contains_key("wf123"));
        assert_eq!(assigned.len(), 2);
        assert!(assigned.contains_key("ds1"));
        assert!(assigned.contains_key("ds2"));
        assert_ne!(assigned["ds1"], assigned["ds2"]);
        assert!(!assigned.values().any(|name| name == "redfox"));
    }

    #[test]
    fn test_bulk_assign_empty_input() {
        let assigned = bulk_assign(Vec::<String>::new(), &redfox());
        assert!(assigned.is_empty());
    }

    #[test]
    fn test_alias_manager_set_and_list() {
        let (manager, _config, _temp_dir) = temp_alias_manager();

        assert_eq!(manager.set("redfox", "wf123").unwrap(), None);
        assert_eq!(
            manager.set("redfox", "wf999").unwrap(),
            Some("wf123".to_string())
        );

        let aliases = manager.list().unwrap();
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases["redfox"], "wf999");
    }

    #[test]
    fn test_alias_manager_set_random() {
        let (manager, _config, _temp_dir) = temp_alias_manager();

        let name = manager.set_random("wf123").unwrap();
        assert_eq!(manager.list().unwrap()[&name], "wf123");
    }

    #[test]
    fn test_alias_manager_assign_all() {
        let (manager, _config, _temp_dir) = temp_alias_manager();
        manager.set("redfox", "wf123").unwrap();

        let ids = vec!["wf123".to_string(), "ds1".to_string()];
        let assigned = manager.assign_all(&ids).unwrap();
        assert_eq!(assigned.len(), 1);

        let aliases = manager.list().unwrap();
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases["redfox"], "wf123");
        assert_eq!(aliases[&assigned["ds1"]], "ds1");
    }

    #[test]
    fn test_alias_manager_remove_unknown_writes_nothing() {
        let (manager, config, _temp_dir) = temp_alias_manager();

        let result = manager.remove("nonexistent");
        assert!(matches!(result, Err(Error::UnknownAlias(_))));
        assert!(!config.exists());
    }

    #[test]
    fn test_alias_manager_remove_and_clear() {
        let (manager, _config, _temp_dir) = temp_alias_manager();
        manager.set("a", "1").unwrap();
        manager.set("b", "2").unwrap();
        manager.set("c", "3").unwrap();

        assert_eq!(manager.remove("a").unwrap(), "1");
        assert_eq!(manager.clear().unwrap(), 2);
        assert!(manager.list().unwrap().is_empty());
    }
}
