//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockCourseCommand, MockCourseModuleCommand, MockCourseModuleQuery, MockCourseQuery,
    MockMaterialCommand, MockMaterialQuery, MockSubjectCommand, MockSubjectQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mocked driving ports for handler tests.
///
/// Every mock starts without expectations, so any call a test did not set up
/// panics. Configure only the ports the handler under test touches.
#[derive(Default)]
pub struct MockPorts {
    pub courses: MockCourseCommand,
    pub courses_query: MockCourseQuery,
    pub modules: MockCourseModuleCommand,
    pub modules_query: MockCourseModuleQuery,
    pub materials: MockMaterialCommand,
    pub materials_query: MockMaterialQuery,
    pub subjects: MockSubjectCommand,
    pub subjects_query: MockSubjectQuery,
}

impl From<MockPorts> for HttpState {
    fn from(mocks: MockPorts) -> Self {
        HttpState::new(HttpStatePorts {
            courses: Arc::new(mocks.courses),
            courses_query: Arc::new(mocks.courses_query),
            modules: Arc::new(mocks.modules),
            modules_query: Arc::new(mocks.modules_query),
            materials: Arc::new(mocks.materials),
            materials_query: Arc::new(mocks.materials_query),
            subjects: Arc::new(mocks.subjects),
            subjects_query: Arc::new(mocks.subjects_query),
        })
    }
}

/// Read a response body as UTF-8 text.
pub async fn body_text(res: actix_web::dev::ServiceResponse) -> String {
    let bytes = actix_web::test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
