//! Integration tests for the Diesel catalogue repositories against embedded
//! PostgreSQL.
//!
//! Each test provisions a fresh database, applies the embedded migrations
//! and drives the repositories through their ports.

use chrono::NaiveDate;
use course_catalogue::domain::ports::{
    CatalogueRepositoryError, CourseModuleRepository, CourseRepository, MaterialRepository,
    SubjectRepository,
};
use course_catalogue::domain::{
    CourseDraft, CourseId, CourseModuleDraft, MaterialDraft, MaterialType, Subject,
    SubjectCourseCount, SubjectDraft,
};
use course_catalogue::outbound::persistence::{
    DbPool, DieselCourseModuleRepository, DieselCourseRepository, DieselMaterialRepository,
    DieselSubjectRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, migrate_schema, reset_database};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    subjects: DieselSubjectRepository,
    courses: DieselCourseRepository,
    modules: DieselCourseModuleRepository,
    materials: DieselMaterialRepository,
}

impl TestContext {
    fn subject(&self, name: &str) -> Subject {
        self.runtime
            .block_on(self.subjects.save(None, &SubjectDraft::new(name)))
            .expect("subject saved")
    }

    fn course(&self, draft: CourseDraft) -> CourseId {
        self.runtime
            .block_on(self.courses.save(None, &draft))
            .expect("course saved")
            .id
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let db_name = format!("catalogue_{}", Uuid::new_v4().simple());
    reset_database(&cluster, &db_name)?;
    let database_url = cluster.connection().database_url(&db_name);
    migrate_schema(&database_url)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        subjects: DieselSubjectRepository::new(pool.clone()),
        courses: DieselCourseRepository::new(pool.clone()),
        modules: DieselCourseModuleRepository::new(pool.clone()),
        materials: DieselMaterialRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[rstest]
fn course_round_trip_and_replace(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: course_round_trip_and_replace skipped");
        return;
    };
    let subject = ctx.subject("Computer Science");

    let mut draft = CourseDraft::new("Java Basics");
    draft.subject_id = Some(subject.id);
    draft.start_date = Some(date(2025, 3, 1));
    draft.duration_minutes = Some(120);
    draft.tags = vec!["JVM".to_owned()];
    let id = ctx.course(draft);

    let stored = ctx
        .runtime
        .block_on(ctx.courses.find_by_id(id))
        .expect("lookup")
        .expect("course present");
    assert_eq!(stored.title, "Java Basics");
    assert_eq!(stored.start_date, Some(date(2025, 3, 1)));
    assert_eq!(stored.tags, vec!["JVM".to_owned()]);

    let replaced = ctx
        .runtime
        .block_on(ctx.courses.save(Some(id), &CourseDraft::new("Java Advanced")))
        .expect("replace");
    assert_eq!(replaced.id, id);
    assert_eq!(replaced.title, "Java Advanced");
    assert!(replaced.subject_id.is_none());
    assert!(replaced.tags.is_empty());
}

#[rstest]
fn unknown_parent_is_reported(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_parent_is_reported skipped");
        return;
    };

    let err = ctx
        .runtime
        .block_on(ctx.modules.save(
            None,
            &CourseModuleDraft::new(CourseId::new(404), "Orphan"),
        ))
        .expect_err("missing course rejected");

    assert!(
        matches!(err, CatalogueRepositoryError::MissingParent { id: 404, .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn derived_course_queries(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: derived_course_queries skipped");
        return;
    };
    let mut java = CourseDraft::new("Java Basics");
    java.level = Some("Beginner".to_owned());
    java.start_date = Some(date(2025, 1, 10));
    java.duration_minutes = Some(60);
    java.tags = vec!["Backend".to_owned()];
    let java = ctx.course(java);

    let mut spring = CourseDraft::new("Web");
    spring.description = Some("Spring Boot in practice".to_owned());
    spring.start_date = Some(date(2025, 6, 1));
    spring.duration_minutes = Some(240);
    let spring = ctx.course(spring);

    let undated = ctx.course(CourseDraft::new("Undated"));

    let ids = |courses: Vec<course_catalogue::domain::Course>| {
        courses.into_iter().map(|c| c.id).collect::<Vec<_>>()
    };
    let rt = &ctx.runtime;

    let found = rt
        .block_on(ctx.courses.search_by_keywords("JAVA", "spring"))
        .expect("search");
    assert_eq!(ids(found), vec![java, spring]);

    let blank = rt
        .block_on(ctx.courses.search_by_keywords("", "spring"))
        .expect("search");
    assert!(blank.is_empty());

    let found = rt
        .block_on(ctx.courses.find_by_level("Beginner"))
        .expect("level");
    assert_eq!(ids(found), vec![java]);

    let found = rt
        .block_on(
            ctx.courses
                .find_by_start_date_between(date(2025, 1, 10), date(2025, 6, 1)),
        )
        .expect("range");
    assert_eq!(ids(found), vec![java, spring]);

    let found = rt.block_on(ctx.courses.find_by_tag("back")).expect("tag");
    assert_eq!(ids(found), vec![java]);

    let found = rt
        .block_on(ctx.courses.find_all_ordered_by_start_date())
        .expect("by start date");
    assert_eq!(ids(found), vec![java, spring, undated]);

    let found = rt
        .block_on(ctx.courses.find_all_ordered_by_duration_desc())
        .expect("by duration");
    assert_eq!(ids(found), vec![spring, java, undated]);
}

#[rstest]
fn modules_follow_requested_order(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: modules_follow_requested_order skipped");
        return;
    };
    let course = ctx.course(CourseDraft::new("Rust"));
    let save = |title: &str, position: i32, duration: Option<u32>| {
        let mut draft = CourseModuleDraft::new(course, title);
        draft.position = position;
        draft.duration_minutes = duration;
        ctx.runtime
            .block_on(ctx.modules.save(None, &draft))
            .expect("module saved")
            .id
    };
    let second = save("Borrowing", 2, Some(30));
    let first = save("Ownership", 1, None);
    let third = save("Lifetimes", 3, Some(45));

    let ids = |modules: Vec<course_catalogue::domain::CourseModule>| {
        modules.into_iter().map(|m| m.id).collect::<Vec<_>>()
    };
    let rt = &ctx.runtime;

    let by_position = rt
        .block_on(ctx.modules.find_by_course_id_ordered_by_position(course))
        .expect("by position");
    assert_eq!(ids(by_position), vec![first, second, third]);

    let by_duration = rt
        .block_on(ctx.modules.find_by_course_id_ordered_by_duration_desc(course))
        .expect("by duration");
    assert_eq!(ids(by_duration), vec![third, second, first]);

    let found = rt
        .block_on(ctx.modules.search_by_keywords("OWNER", "life"))
        .expect("search");
    assert_eq!(ids(found), vec![first, third]);
}

#[rstest]
fn subject_delete_cascades_and_counts_update(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: subject_delete_cascades_and_counts_update skipped");
        return;
    };
    let science = ctx.subject("Science");
    let arts = ctx.subject("Arts");
    ctx.subject("Empty");

    let mut physics = CourseDraft::new("Physics");
    physics.subject_id = Some(science.id);
    let physics = ctx.course(physics);
    let mut chemistry = CourseDraft::new("Chemistry");
    chemistry.subject_id = Some(science.id);
    ctx.course(chemistry);
    let mut painting = CourseDraft::new("Painting");
    painting.subject_id = Some(arts.id);
    ctx.course(painting);

    let rt = &ctx.runtime;
    let material = rt
        .block_on(ctx.materials.save(
            None,
            &MaterialDraft::new(physics, "Lecture notes", MaterialType::Pdf),
        ))
        .expect("material saved");

    let by_subject = rt
        .block_on(ctx.materials.find_by_subject_id(science.id))
        .expect("by subject");
    assert_eq!(by_subject, vec![material.clone()]);
    let by_type = rt
        .block_on(ctx.materials.find_by_type(MaterialType::Pdf))
        .expect("by type");
    assert_eq!(by_type, vec![material.clone()]);

    let counts = rt
        .block_on(ctx.courses.count_by_subject())
        .expect("counts");
    assert_eq!(
        counts,
        vec![
            SubjectCourseCount {
                subject_id: science.id,
                course_count: 2,
            },
            SubjectCourseCount {
                subject_id: arts.id,
                course_count: 1,
            },
        ]
    );

    rt.block_on(ctx.subjects.delete_by_id(science.id))
        .expect("subject deleted");

    assert!(
        !rt.block_on(ctx.courses.exists_by_id(physics))
            .expect("exists check")
    );
    assert!(
        !rt.block_on(ctx.materials.exists_by_id(material.id))
            .expect("exists check")
    );
    let counts = rt
        .block_on(ctx.courses.count_by_subject())
        .expect("counts");
    assert_eq!(counts.len(), 1);
}

#[rstest]
fn course_delete_cascades_to_children(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: course_delete_cascades_to_children skipped");
        return;
    };
    let doomed = ctx.course(CourseDraft::new("Doomed"));
    let kept = ctx.course(CourseDraft::new("Kept"));
    let rt = &ctx.runtime;

    let module = rt
        .block_on(ctx.modules.save(None, &CourseModuleDraft::new(doomed, "Intro")))
        .expect("module saved");
    let material = rt
        .block_on(ctx.materials.save(
            None,
            &MaterialDraft::new(doomed, "Slides", MaterialType::Video),
        ))
        .expect("material saved");
    let kept_module = rt
        .block_on(ctx.modules.save(None, &CourseModuleDraft::new(kept, "Setup")))
        .expect("module saved");

    rt.block_on(ctx.courses.delete_by_id(doomed))
        .expect("course deleted");

    assert!(
        rt.block_on(ctx.modules.find_by_id(module.id))
            .expect("lookup")
            .is_none()
    );
    assert!(
        rt.block_on(ctx.materials.find_by_id(material.id))
            .expect("lookup")
            .is_none()
    );
    assert!(
        rt.block_on(ctx.materials.find_by_course_id(doomed))
            .expect("lookup")
            .is_empty()
    );
    let survivors = rt
        .block_on(ctx.modules.find_by_course_id_ordered_by_position(kept))
        .expect("lookup");
    assert_eq!(survivors, vec![kept_module]);
}

#[rstest]
fn subject_keyword_search(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: subject_keyword_search skipped");
        return;
    };
    let science = ctx.subject("Computer Science");
    ctx.subject("History");
    let mut maths = SubjectDraft::new("Maths");
    maths.description = Some("Numbers and proofs".to_owned());
    let maths = ctx
        .runtime
        .block_on(ctx.subjects.save(None, &maths))
        .expect("subject saved");

    let found = ctx
        .runtime
        .block_on(ctx.subjects.search_by_keywords("science", "PROOF"))
        .expect("search");

    assert_eq!(
        found.into_iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![science.id, maths.id]
    );
}
