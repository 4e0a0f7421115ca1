//! [`SqliteStore`] — the SQLite implementation of [`GradeStore`].

use std::path::Path;

use alumnos_core::{
  catalog::{Course, Semester, Subject},
  grades::GradeRow,
  pending::EnrollmentProgress,
  store::GradeStore,
  student::{Enrollment, NewStudent, Student},
};
use chrono::Utc;
use rusqlite::{OptionalExtension as _, Transaction};

use crate::{
  Error, Result,
  encode::{RawStudent, STUDENT_COLUMNS, decode_partial_list, encode_dt},
  schema::SCHEMA,
  seed::seed_catalog,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A grade store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, run schema initialisation and seed
  /// the catalog.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        seed_catalog(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Count rows in `table`. Test helper for atomicity checks.
  #[cfg(test)]
  pub(crate) async fn count(&self, table: &'static str) -> Result<i64> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get::<_, i64>(0))?)
        })
        .await?,
    )
  }

  /// Hard-delete a student. Test helper for cascade checks.
  #[cfg(test)]
  pub(crate) async fn delete_student(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM students WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Insert one enrollment per subject inside `tx`.
///
/// The caller must drop `tx` without committing if this fails.
fn insert_enrollments(
  tx:          &Transaction<'_>,
  student_id:  i64,
  semester_id: i64,
  subject_ids: &[i64],
) -> Result<()> {
  let mut stmt = tx
    .prepare(
      "INSERT INTO enrollments (student_id, semester_id, subject_id)
       VALUES (?1, ?2, ?3)",
    )
    .map_err(|e| Error::Database(e.into()))?;

  for &subject_id in subject_ids {
    stmt
      .execute(rusqlite::params![student_id, semester_id, subject_id])
      .map_err(|source| Error::Enrollment { subject_id, source })?;
  }
  Ok(())
}

// ─── GradeStore impl ─────────────────────────────────────────────────────────

impl GradeStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  /// The whole transaction runs in one closure on the connection thread, so
  /// a dropped caller future still ends in a full commit or a full rollback.
  async fn register_student(&self, input: NewStudent) -> Result<i64> {
    let created_at = encode_dt(Utc::now());

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO students (
             name, lastname1, lastname2, course_id, current_semester, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            input.name,
            input.lastname1,
            input.lastname2,
            input.course_id,
            input.current_semester,
            created_at,
          ],
        )?;
        let student_id = tx.last_insert_rowid();

        if let Err(e) =
          insert_enrollments(&tx, student_id, input.current_semester, &input.subject_ids)
        {
          // Dropping `tx` rolls back the student row as well.
          return Ok(Err(e));
        }

        tx.commit()?;
        Ok(Ok(student_id))
      })
      .await??;

    Ok(id)
  }

  /// Atomic like [`Self::register_student`]; never partially committed.
  async fn enroll(&self, student_id: i64, semester_id: i64, subject_ids: Vec<i64>) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if let Err(e) = insert_enrollments(&tx, student_id, semester_id, &subject_ids) {
          return Ok(Err(e));
        }
        tx.commit()?;
        Ok(Ok(()))
      })
      .await??;

    Ok(())
  }

  async fn upsert_partial_grade(
    &self,
    enrollment_id:  i64,
    partial_number: u32,
    grade:          f64,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let outcome = conn
          .execute(
            "INSERT INTO partial_grades (enrollment_id, partial_number, grade)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (enrollment_id, partial_number)
             DO UPDATE SET grade = excluded.grade",
            rusqlite::params![enrollment_id, partial_number, grade],
          )
          .map(|_| ())
          .map_err(|source| Error::Grade { enrollment_id, partial_number, source });
        Ok(outcome)
      })
      .await??;

    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_student(&self, id: i64) -> Result<Option<Student>> {
    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
              rusqlite::params![id],
              RawStudent::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn grade_rows(&self, student_id: i64) -> Result<Vec<GradeRow>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.semester_id, sem.name, e.subject_id, sub.name,
                  pg.partial_number, pg.grade
           FROM enrollments e
           JOIN partial_grades pg ON pg.enrollment_id = e.id
           JOIN semesters sem     ON sem.id = e.semester_id
           JOIN subjects sub      ON sub.id = e.subject_id
           WHERE e.student_id = ?1
           ORDER BY e.semester_id, e.subject_id, pg.partial_number",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![student_id], |row| {
            Ok(GradeRow {
              semester_id:    row.get(0)?,
              semester_name:  row.get(1)?,
              subject_id:     row.get(2)?,
              subject_name:   row.get(3)?,
              partial_number: row.get(4)?,
              grade:          row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    tracing::debug!(student_id, rows = rows.len(), "scanned partial grades");
    Ok(rows)
  }

  async fn current_semester_progress(&self, student_id: i64) -> Result<Vec<EnrollmentProgress>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.id, e.semester_id, e.subject_id, sub.name,
                  GROUP_CONCAT(pg.partial_number)
           FROM enrollments e
           JOIN students st           ON st.id = e.student_id
           JOIN subjects sub          ON sub.id = e.subject_id
           LEFT JOIN partial_grades pg ON pg.enrollment_id = e.id
           WHERE e.student_id = ?1
             AND e.semester_id = st.current_semester
           GROUP BY e.id
           ORDER BY e.semester_id, e.subject_id",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![student_id], |row| {
            let recorded: Option<String> = row.get(4)?;
            Ok(EnrollmentProgress {
              enrollment_id:     row.get(0)?,
              semester_id:       row.get(1)?,
              subject_id:        row.get(2)?,
              subject_name:      row.get(3)?,
              recorded_partials: decode_partial_list(recorded.as_deref()),
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn list_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.id, e.student_id, e.semester_id, sem.name, e.subject_id, sub.name
           FROM enrollments e
           JOIN semesters sem ON sem.id = e.semester_id
           JOIN subjects sub  ON sub.id = e.subject_id
           WHERE e.student_id = ?1
           ORDER BY e.semester_id, e.subject_id",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![student_id], |row| {
            Ok(Enrollment {
              id:            row.get(0)?,
              student_id:    row.get(1)?,
              semester_id:   row.get(2)?,
              semester_name: row.get(3)?,
              subject_id:    row.get(4)?,
              subject_name:  row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn list_students(&self) -> Result<Vec<Student>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn list_courses(&self) -> Result<Vec<Course>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM courses ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| Ok(Course { id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn list_subjects(&self, course_id: i64) -> Result<Vec<Subject>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, course_id, key, name, coins
           FROM subjects
           WHERE course_id = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![course_id], |row| {
            Ok(Subject {
              id:        row.get(0)?,
              course_id: row.get(1)?,
              key:       row.get(2)?,
              name:      row.get(3)?,
              coins:     row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn list_semesters(&self) -> Result<Vec<Semester>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM semesters ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| Ok(Semester { id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }
}
