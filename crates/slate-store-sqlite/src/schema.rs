//! SQL schema for the Slate SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS identities (
    id            TEXT PRIMARY KEY,
    role          TEXT NOT NULL,       -- 'student' | 'teacher'
    name          TEXT NOT NULL,
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,       -- argon2 PHC string
    created_at    TEXT NOT NULL,       -- ISO 8601 UTC
    UNIQUE (role, email)               -- email uniqueness is per role
);

CREATE TABLE IF NOT EXISTS classes (
    class_id   TEXT PRIMARY KEY,
    subject    TEXT NOT NULL,
    teacher_id TEXT NOT NULL,          -- immutable after insert
    created_at TEXT NOT NULL
);

-- Roster membership with set semantics. Mutation is only ever
-- INSERT OR IGNORE or DELETE, each atomic as a single statement.
CREATE TABLE IF NOT EXISTS class_students (
    class_id   TEXT NOT NULL REFERENCES classes(class_id) ON DELETE CASCADE,
    student_id TEXT NOT NULL,
    PRIMARY KEY (class_id, student_id)
);

CREATE TABLE IF NOT EXISTS assignments (
    assignment_id  TEXT PRIMARY KEY,
    title          TEXT NOT NULL,
    class_id       TEXT NOT NULL,
    question_paper TEXT NOT NULL,      -- stored file name under uploads/assignments
    due_date       TEXT NOT NULL       -- ISO 8601 UTC
);

CREATE TABLE IF NOT EXISTS answers (
    answer_id     TEXT PRIMARY KEY,
    assignment_id TEXT NOT NULL,
    student_id    TEXT NOT NULL,
    upload_date   TEXT NOT NULL,
    answer_paper  TEXT NOT NULL        -- stored file name under uploads/answers
);

CREATE INDEX IF NOT EXISTS identities_email_idx   ON identities(role, email);
CREATE INDEX IF NOT EXISTS answers_assignment_idx ON answers(assignment_id);

PRAGMA user_version = 1;
";
