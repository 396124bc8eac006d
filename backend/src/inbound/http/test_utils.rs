//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockTasksCommand, MockUserActivityQuery, MockUsersCommand, MockUsersQuery,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Port mocks for a single handler test; unset expectations fail on call.
#[derive(Default)]
pub struct MockPorts {
    pub users: MockUsersCommand,
    pub users_query: MockUsersQuery,
    pub tasks: MockTasksCommand,
    pub activity: MockUserActivityQuery,
}

impl MockPorts {
    fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.users),
            Arc::new(self.users_query),
            Arc::new(self.tasks),
            Arc::new(self.activity),
        )
    }
}

/// Build an app with every route registered against the given mocks.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .configure(configure)
}
