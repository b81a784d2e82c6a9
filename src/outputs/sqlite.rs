//! SQLite output.
//!
//! All records go into one `Article` table. The table is created on first
//! use and reused afterwards, so repeated runs against the same database
//! append rows.

use crate::error::StoreError;
use crate::models::ArticleRecord;
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS Article (
        ID       INTEGER PRIMARY KEY AUTOINCREMENT,
        URL      VARCHAR(2048) NOT NULL,
        HEADLINE VARCHAR(100) NOT NULL,
        AUTHOR   VARCHAR(30) NOT NULL,
        DATE     VARCHAR(10) NOT NULL
    );
";

const INSERT: &str = "INSERT INTO Article (URL, HEADLINE, AUTHOR, DATE) VALUES (?1, ?2, ?3, ?4)";

/// Insert `articles` in iteration order. Each insert commits on its own.
pub fn write_articles<'a>(
    path: &Path,
    articles: impl IntoIterator<Item = &'a ArticleRecord>,
) -> Result<usize, StoreError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;

    let mut insert = conn.prepare(INSERT)?;
    let mut count = 0;
    for article in articles {
        insert.execute(params![article.url, article.headline, article.author, article.date])?;
        count += 1;
    }
    debug!(count, "Inserted articles");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(headline: &str) -> ArticleRecord {
        ArticleRecord::new(
            "https://www.theverge.com/a".to_string(),
            headline.to_string(),
            "Jane Doe".to_string(),
            "03/04/2024".to_string(),
        )
    }

    fn rows(path: &Path) -> Vec<(i64, String, String, String, String)> {
        let conn = Connection::open(path).unwrap();
        let mut stmt = conn
            .prepare("SELECT ID, URL, HEADLINE, AUTHOR, DATE FROM Article ORDER BY ID")
            .unwrap();
        stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })
        .unwrap()
        .map(|r| r.unwrap())
        .collect()
    }

    #[test]
    fn test_insert_preserves_order_and_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("article.db");
        let articles = vec![record("\"First\""), record("\"Second\"")];

        assert_eq!(write_articles(&path, &articles).unwrap(), 2);

        let stored = rows(&path);
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].0, 1);
        assert_eq!(stored[0].2, "\"First\"");
        assert_eq!(stored[1].0, 2);
        assert_eq!(stored[1].4, "03/04/2024");
    }

    #[test]
    fn test_statement_delimiters_are_stored_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("article.db");
        let nasty = "\"It's \"fine\"); DROP TABLE Article; --\"";

        write_articles(&path, &[record(nasty)]).unwrap();

        assert_eq!(rows(&path)[0].2, nasty);
    }

    #[test]
    fn test_existing_table_is_reused() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("article.db");

        write_articles(&path, &[record("\"One\"")]).unwrap();
        write_articles(&path, &[record("\"Two\"")]).unwrap();

        let headlines: Vec<String> = rows(&path).into_iter().map(|r| r.2).collect();
        assert_eq!(headlines, vec!["\"One\"", "\"Two\""]);
    }
}
