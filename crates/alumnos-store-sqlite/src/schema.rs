//! SQL schema for the alumnos SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Reference data, seeded at startup and never mutated afterwards.
CREATE TABLE IF NOT EXISTS courses (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS subjects (
    id         INTEGER PRIMARY KEY,
    course_id  INTEGER NOT NULL REFERENCES courses(id),
    key        TEXT NOT NULL UNIQUE,
    name       TEXT NOT NULL,
    coins      INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS semesters (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS students (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT NOT NULL,
    lastname1         TEXT NOT NULL,
    lastname2         TEXT NOT NULL DEFAULT '',
    course_id         INTEGER NOT NULL REFERENCES courses(id),
    current_semester  INTEGER NOT NULL REFERENCES semesters(id),
    created_at        TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- One row per (student, semester, subject); the join target for grades.
CREATE TABLE IF NOT EXISTS enrollments (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id   INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    semester_id  INTEGER NOT NULL REFERENCES semesters(id),
    subject_id   INTEGER NOT NULL REFERENCES subjects(id),
    UNIQUE (student_id, semester_id, subject_id)
);

-- Re-submitting a partial overwrites the grade in place; no history is kept.
CREATE TABLE IF NOT EXISTS partial_grades (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    enrollment_id   INTEGER NOT NULL REFERENCES enrollments(id) ON DELETE CASCADE,
    partial_number  INTEGER NOT NULL CHECK (partial_number > 0),
    grade           REAL    NOT NULL CHECK (grade >= 0),
    UNIQUE (enrollment_id, partial_number)
);

CREATE INDEX IF NOT EXISTS subjects_course_idx     ON subjects(course_id);
CREATE INDEX IF NOT EXISTS enrollments_student_idx ON enrollments(student_id, semester_id);

PRAGMA user_version = 1;
";
