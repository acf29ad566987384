//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Subjects group related courses.
    subjects (id) {
        /// Primary key assigned from a `BIGSERIAL` sequence.
        id -> Int8,
        name -> Text,
        description -> Nullable<Text>,
        category -> Nullable<Text>,
        /// Free-form tags; never null, empty by default.
        tags -> Array<Text>,
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Courses, optionally filed under a subject.
    ///
    /// Deleting the subject cascades to its courses.
    courses (id) {
        id -> Int8,
        subject_id -> Nullable<Int8>,
        title -> Text,
        /// At most 1000 characters (check constraint).
        description -> Nullable<Text>,
        level -> Nullable<Text>,
        start_date -> Nullable<Date>,
        duration_minutes -> Nullable<Int4>,
        tags -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered units of course content.
    course_modules (id) {
        id -> Int8,
        course_id -> Int8,
        title -> Text,
        content -> Nullable<Text>,
        video_url -> Nullable<Text>,
        /// Display order within the course.
        position -> Int4,
        duration_minutes -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Learning resources attached to a course.
    materials (id) {
        id -> Int8,
        course_id -> Int8,
        title -> Text,
        description -> Nullable<Text>,
        /// One of `VIDEO`, `PDF` or `QUIZ` (check constraint).
        material_type -> Text,
        url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(courses -> subjects (subject_id));
diesel::joinable!(course_modules -> courses (course_id));
diesel::joinable!(materials -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(subjects, courses, course_modules, materials);
