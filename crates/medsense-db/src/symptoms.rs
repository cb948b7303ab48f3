//! Symptom repository: the ordered feature vocabulary.

use std::sync::Arc;

use medsense_common::Symptom;
use rusqlite::params;

use crate::database::Database;
use crate::error::Result;

#[derive(Clone)]
pub struct SymptomRepository {
    db: Arc<Database>,
}

impl SymptomRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All symptoms in insertion order.
    pub fn list(&self) -> Result<Vec<Symptom>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM symptoms ORDER BY id")?;
            let symptoms = stmt
                .query_map([], |row| {
                    Ok(Symptom {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(symptoms)
        })
    }

    /// Symptom names in insertion order. Position i is feature i.
    pub fn vocabulary(&self) -> Result<Vec<String>> {
        Ok(self.list()?.into_iter().map(|s| s.name).collect())
    }

    pub fn count(&self) -> Result<u64> {
        self.db.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM symptoms", [], |row| row.get(0))?;
            Ok(n as u64)
        })
    }

    /// Append symptoms, skipping names that already exist.
    /// Returns the number of rows actually inserted.
    pub fn insert_batch(&self, names: &[String]) -> Result<usize> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            let mut inserted = 0;
            {
                let mut stmt = tx.prepare("INSERT OR IGNORE INTO symptoms (name) VALUES (?1)")?;
                for name in names {
                    let name = name.trim();
                    if name.is_empty() {
                        continue;
                    }
                    inserted += stmt.execute(params![name])?;
                }
            }
            tx.commit()?;
            Ok(inserted)
        })
    }
}
