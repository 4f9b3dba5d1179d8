use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rig_core::{Rule, RuleId, RulePatch, Severity};
use rig_store::{RuleStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension};

const RULE_COLUMNS: &str =
    "id, rule_number, name, description, severity, is_active, message_template, rule_config";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("open sqlite db {}", db_path.display()))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        // init schema
        let init_sql = include_str!("../migrations/0001_init.sql");
        conn.execute_batch(init_sql)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn severity_to_str(s: &Severity) -> &'static str {
        s.as_str()
    }

    fn str_to_severity(s: &str) -> Severity {
        // The CHECK constraint keeps unknown values out of the table.
        Severity::parse(s).unwrap_or(Severity::Warning)
    }

    fn row_to_rule(r: &rusqlite::Row) -> rusqlite::Result<Rule> {
        Ok(Rule {
            id: RuleId::from_str(r.get::<_, String>(0)?),
            rule_number: r.get::<_, i64>(1)? as u32,
            name: r.get(2)?,
            description: r.get(3)?,
            severity: Self::str_to_severity(&r.get::<_, String>(4)?),
            is_active: r.get::<_, i64>(5)? != 0,
            message_template: r.get(6)?,
            rule_config: r.get(7)?,
        })
    }
}

fn db_err(e: rusqlite::Error) -> StoreError {
    StoreError::Persistence(anyhow::Error::new(e))
}

impl RuleStore for SqliteStore {
    fn list(&self, active_only: bool) -> Result<Vec<Rule>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let sql = if active_only {
            format!("SELECT {} FROM rules WHERE is_active = 1 ORDER BY rule_number", RULE_COLUMNS)
        } else {
            format!("SELECT {} FROM rules ORDER BY rule_number", RULE_COLUMNS)
        };
        let mut stmt = conn.prepare(&sql).map_err(db_err)?;
        let rows = stmt.query_map([], Self::row_to_rule).map_err(db_err)?;
        let mut rules = vec![];
        for row in rows {
            rules.push(row.map_err(db_err)?);
        }
        Ok(rules)
    }

    fn get(&self, id: &RuleId) -> Result<Rule, StoreError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!("SELECT {} FROM rules WHERE id = ?1", RULE_COLUMNS);
        conn.query_row(&sql, params![id.as_str()], Self::row_to_rule)
            .optional()
            .map_err(db_err)?
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))
    }

    fn update(&self, id: &RuleId, patch: RulePatch) -> Result<Rule, StoreError> {
        let conn = self.conn.lock().unwrap();
        let tx = conn.unchecked_transaction().map_err(db_err)?;

        if let Some(active) = patch.is_active {
            tx.execute("UPDATE rules SET is_active = ?1 WHERE id = ?2", params![active, id.as_str()])
                .map_err(db_err)?;
        }
        if let Some(severity) = patch.severity {
            tx.execute(
                "UPDATE rules SET severity = ?1 WHERE id = ?2",
                params![Self::severity_to_str(&severity), id.as_str()],
            )
            .map_err(db_err)?;
        }

        let sql = format!("SELECT {} FROM rules WHERE id = ?1", RULE_COLUMNS);
        let rule = tx
            .query_row(&sql, params![id.as_str()], Self::row_to_rule)
            .optional()
            .map_err(db_err)?
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))?;

        tx.commit().map_err(db_err)?;
        Ok(rule)
    }

    fn insert(&self, rule: Rule) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO rules(id, rule_number, name, description, severity, is_active, message_template, rule_config)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                rule.id.as_str(),
                rule.rule_number as i64,
                rule.name,
                rule.description,
                Self::severity_to_str(&rule.severity),
                rule.is_active,
                rule.message_template,
                rule.rule_config
            ],
        )
        .map_err(db_err)?;
        Ok(())
    }
}
