//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live here so
//! each repository only deals with rows at its edges.

use diesel::prelude::*;

use crate::domain::ports::CatalogueRepositoryError;
use crate::domain::{
    Course, CourseDraft, CourseId, CourseModule, CourseModuleDraft, CourseModuleId, Material,
    MaterialDraft, MaterialId, Subject, SubjectDraft, SubjectId,
};

use super::schema::{course_modules, courses, materials, subjects};

/// Convert a stored duration into minutes.
fn duration_from_db(value: Option<i32>) -> Result<Option<u32>, CatalogueRepositoryError> {
    value
        .map(u32::try_from)
        .transpose()
        .map_err(|_| CatalogueRepositoryError::query("negative duration in store"))
}

/// Convert minutes into the stored `INTEGER` column.
pub(crate) fn duration_for_db(value: Option<u32>) -> Result<Option<i32>, CatalogueRepositoryError> {
    value
        .map(i32::try_from)
        .transpose()
        .map_err(|_| CatalogueRepositoryError::query("duration out of range"))
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subjects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubjectRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl From<SubjectRow> for Subject {
    fn from(row: SubjectRow) -> Self {
        Subject::new(
            SubjectId::new(row.id),
            SubjectDraft {
                name: row.name,
                description: row.description,
                category: row.category,
                tags: row.tags,
            },
        )
    }
}

/// Insert and update payload for subjects.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = subjects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SubjectValues<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub tags: &'a [String],
}

impl<'a> From<&'a SubjectDraft> for SubjectValues<'a> {
    fn from(draft: &'a SubjectDraft) -> Self {
        Self {
            name: &draft.name,
            description: draft.description.as_deref(),
            category: draft.category.as_deref(),
            tags: &draft.tags,
        }
    }
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i64,
    pub subject_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub duration_minutes: Option<i32>,
    pub tags: Vec<String>,
}

impl TryFrom<CourseRow> for Course {
    type Error = CatalogueRepositoryError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Course::new(
            CourseId::new(row.id),
            CourseDraft {
                subject_id: row.subject_id.map(SubjectId::new),
                title: row.title,
                description: row.description,
                level: row.level,
                start_date: row.start_date,
                duration_minutes: duration_from_db(row.duration_minutes)?,
                tags: row.tags,
            },
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseValues<'a> {
    pub subject_id: Option<i64>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub level: Option<&'a str>,
    pub start_date: Option<chrono::NaiveDate>,
    pub duration_minutes: Option<i32>,
    pub tags: &'a [String],
}

impl<'a> CourseValues<'a> {
    pub(crate) fn from_draft(draft: &'a CourseDraft) -> Result<Self, CatalogueRepositoryError> {
        Ok(Self {
            subject_id: draft.subject_id.map(SubjectId::get),
            title: &draft.title,
            description: draft.description.as_deref(),
            level: draft.level.as_deref(),
            start_date: draft.start_date,
            duration_minutes: duration_for_db(draft.duration_minutes)?,
            tags: &draft.tags,
        })
    }
}

// ---------------------------------------------------------------------------
// Course modules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = course_modules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseModuleRow {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub position: i32,
    pub duration_minutes: Option<i32>,
}

impl TryFrom<CourseModuleRow> for CourseModule {
    type Error = CatalogueRepositoryError;

    fn try_from(row: CourseModuleRow) -> Result<Self, Self::Error> {
        Ok(CourseModule::new(
            CourseModuleId::new(row.id),
            CourseModuleDraft {
                course_id: CourseId::new(row.course_id),
                title: row.title,
                content: row.content,
                video_url: row.video_url,
                position: row.position,
                duration_minutes: duration_from_db(row.duration_minutes)?,
            },
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = course_modules)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseModuleValues<'a> {
    pub course_id: i64,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub video_url: Option<&'a str>,
    pub position: i32,
    pub duration_minutes: Option<i32>,
}

impl<'a> CourseModuleValues<'a> {
    pub(crate) fn from_draft(
        draft: &'a CourseModuleDraft,
    ) -> Result<Self, CatalogueRepositoryError> {
        Ok(Self {
            course_id: draft.course_id.get(),
            title: &draft.title,
            content: draft.content.as_deref(),
            video_url: draft.video_url.as_deref(),
            position: draft.position,
            duration_minutes: duration_for_db(draft.duration_minutes)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = materials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MaterialRow {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub material_type: String,
    pub url: Option<String>,
}

impl TryFrom<MaterialRow> for Material {
    type Error = CatalogueRepositoryError;

    fn try_from(row: MaterialRow) -> Result<Self, Self::Error> {
        let material_type = row
            .material_type
            .parse()
            .map_err(|err: crate::domain::UnknownMaterialType| {
                CatalogueRepositoryError::query(err.to_string())
            })?;
        Ok(Material::new(
            MaterialId::new(row.id),
            MaterialDraft {
                course_id: CourseId::new(row.course_id),
                title: row.title,
                description: row.description,
                material_type,
                url: row.url,
            },
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = materials)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MaterialValues<'a> {
    pub course_id: i64,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub material_type: &'static str,
    pub url: Option<&'a str>,
}

impl<'a> From<&'a MaterialDraft> for MaterialValues<'a> {
    fn from(draft: &'a MaterialDraft) -> Self {
        Self {
            course_id: draft.course_id.get(),
            title: &draft.title,
            description: draft.description.as_deref(),
            material_type: draft.material_type.as_str(),
            url: draft.url.as_deref(),
        }
    }
}

/// Convert a batch of rows, failing on the first bad row.
pub(crate) fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, CatalogueRepositoryError>
where
    T: TryFrom<R, Error = CatalogueRepositoryError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MaterialType;
    use rstest::rstest;

    #[rstest]
    fn negative_stored_durations_are_rejected() {
        let row = CourseRow {
            id: 1,
            subject_id: None,
            title: "Broken".to_owned(),
            description: None,
            level: None,
            start_date: None,
            duration_minutes: Some(-5),
            tags: Vec::new(),
        };

        assert!(Course::try_from(row).is_err());
    }

    #[rstest]
    fn oversized_durations_cannot_be_stored() {
        assert!(duration_for_db(Some(u32::MAX)).is_err());
        assert_eq!(duration_for_db(Some(45)).ok(), Some(Some(45)));
    }

    #[rstest]
    fn material_rows_parse_their_type() {
        let row = MaterialRow {
            id: 3,
            course_id: 1,
            title: "Quiz 1".to_owned(),
            description: None,
            material_type: "QUIZ".to_owned(),
            url: None,
        };

        let material = Material::try_from(row).expect("valid row");
        assert_eq!(material.material_type, MaterialType::Quiz);
    }

    #[rstest]
    fn unknown_material_types_are_query_errors() {
        let row = MaterialRow {
            id: 3,
            course_id: 1,
            title: "Audio".to_owned(),
            description: None,
            material_type: "AUDIO".to_owned(),
            url: None,
        };

        assert!(matches!(
            Material::try_from(row),
            Err(CatalogueRepositoryError::Query { .. })
        ));
    }
}
