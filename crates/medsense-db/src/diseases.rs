//! Disease repository.
//!
//! Read path for the knowledge base plus the bulk operations used by the
//! seed import.

use std::sync::Arc;

use medsense_common::entities::fold_name;
use medsense_common::{Disease, DiseaseSource};
use rusqlite::{params, Row};

use crate::database::Database;
use crate::error::Result;

const SELECT_COLUMNS: &str =
    "SELECT name, description, treatment, symptoms, severity, specialist, category FROM diseases";

/// Repository for disease operations.
#[derive(Clone)]
pub struct DiseaseRepository {
    db: Arc<Database>,
}

impl DiseaseRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Find a disease by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Disease>> {
        let folded = fold_name(name);
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE name_folded = ?1 LIMIT 1"))?;
            let mut rows = stmt.query(params![folded])?;
            let disease = match rows.next()? {
                Some(row) => Some(disease_from_row(row)?),
                None => None,
            };
            Ok(disease)
        })
    }

    /// All diseases ordered by name.
    pub fn list_all(&self) -> Result<Vec<Disease>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY name"))?;
            let mut rows = stmt.query([])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(disease_from_row(row)?);
            }
            Ok(out)
        })
    }

    /// Count all diseases.
    pub fn count(&self) -> Result<u64> {
        self.db.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM diseases", [], |row| row.get(0))?;
            Ok(n as u64)
        })
    }

    /// Insert multiple diseases in one transaction.
    pub fn insert_batch(&self, diseases: &[Disease]) -> Result<usize> {
        if diseases.is_empty() {
            return Ok(0);
        }

        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO diseases
                     (name, name_folded, description, treatment, symptoms, severity, specialist, category)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )?;
                for d in diseases {
                    stmt.execute(params![
                        d.name,
                        fold_name(&d.name),
                        d.description,
                        d.treatment,
                        serde_json::to_string(&d.symptoms)?,
                        d.severity,
                        d.specialist,
                        d.category,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(diseases.len())
        })
    }

    /// Delete every disease. Returns the number of removed rows.
    pub fn delete_all(&self) -> Result<usize> {
        self.db.with_conn(|conn| Ok(conn.execute("DELETE FROM diseases", [])?))
    }
}

impl DiseaseSource for DiseaseRepository {
    fn find_disease(&self, name: &str) -> medsense_common::Result<Option<Disease>> {
        Ok(self.find_by_name(name)?)
    }
}

fn disease_from_row(row: &Row<'_>) -> Result<Disease> {
    let symptoms_json: String = row.get(3)?;
    Ok(Disease {
        name: row.get(0)?,
        description: row.get(1)?,
        treatment: row.get(2)?,
        symptoms: serde_json::from_str(&symptoms_json)?,
        severity: row.get(4)?,
        specialist: row.get(5)?,
        category: row.get(6)?,
    })
}
