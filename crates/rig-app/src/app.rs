use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rig_admin::RuleAdmin;
use rig_core::{Issue, PartSelection};
use rig_engine::Evaluator;
use rig_pack::{compile_rules, load_rule_pack, load_selection, pack_hash, parse_rule_pack, RulePack};
use rig_store::RuleStore;
use rig_store_sqlite::SqliteStore;
use tracing::info;

use crate::config::Config;
use crate::totals::ensure_build_totals;

const DEFAULT_PACK: &str = include_str!("../packs/default_rules.yaml");

/// Outcome of seeding one pack into the store. Rules already present
/// (by id or ordinal) are left untouched, so seeding is idempotent.
#[derive(Clone, Debug)]
pub struct SeedReport {
    pub pack: String,
    pub hash: String,
    pub inserted: usize,
    pub skipped: usize,
}

/// Ties config, store and engine together for the CLI. The engine itself
/// stays pure; everything filesystem-shaped lives here.
pub struct App {
    pub root: PathBuf,
    pub cfg: Config,
    pub store: SqliteStore,
}

impl App {
    pub fn open(root: PathBuf) -> Result<Self> {
        let cfg_path = Config::config_path(&root);
        let cfg = if cfg_path.exists() {
            Config::load_from(&cfg_path)?
        } else {
            let project_id = root.file_name().and_then(|s| s.to_str()).unwrap_or("rig");
            let cfg = Config::default_for_dir(project_id);
            cfg.save_to(&cfg_path)?;
            cfg
        };

        let store = SqliteStore::open(&cfg.db_path(&root))?;
        Ok(Self { root, cfg, store })
    }

    /// Create `.rigcheck/` with config + db and seed the default rules.
    pub fn init_dir(root: &Path) -> Result<SeedReport> {
        let app = Self::open(root.to_path_buf())?;
        app.seed_default_pack()
    }

    pub fn admin(&self) -> RuleAdmin<'_> {
        RuleAdmin::new(&self.store)
    }

    pub fn seed_default_pack(&self) -> Result<SeedReport> {
        let pack = parse_rule_pack(DEFAULT_PACK).context("builtin default pack")?;
        self.seed_pack(&pack)
    }

    pub fn seed_pack_file(&self, path: &Path) -> Result<SeedReport> {
        let pack = load_rule_pack(path)?;
        self.seed_pack(&pack)
    }

    fn seed_pack(&self, pack: &RulePack) -> Result<SeedReport> {
        let existing = self.store.list(false)?;
        let existing_ids: HashSet<&str> = existing.iter().map(|r| r.id.as_str()).collect();
        let existing_numbers: HashSet<u32> = existing.iter().map(|r| r.rule_number).collect();

        let mut inserted = 0;
        let mut skipped = 0;
        for rule in compile_rules(pack) {
            if existing_ids.contains(rule.id.as_str()) || existing_numbers.contains(&rule.rule_number)
            {
                skipped += 1;
                continue;
            }
            self.store.insert(rule)?;
            inserted += 1;
        }

        let report = SeedReport {
            pack: pack.name.clone(),
            hash: pack_hash(pack),
            inserted,
            skipped,
        };
        info!(pack = report.pack, inserted, skipped, "seeded rule pack");
        Ok(report)
    }

    /// Evaluate a selection file against the current rule set. Build
    /// aggregates are derived before evaluation when the file has no
    /// explicit `build` entry.
    pub fn check_file(&self, selection_path: &Path) -> Result<Vec<Issue>> {
        let mut selection = load_selection(selection_path)?;
        self.check(&mut selection)
    }

    pub fn check(&self, selection: &mut PartSelection) -> Result<Vec<Issue>> {
        ensure_build_totals(selection);
        let issues = Evaluator::new(&self.store).evaluate(selection)?;
        Ok(issues)
    }
}
