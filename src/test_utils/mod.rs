#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod http;

pub(crate) use db::{TEST_PASSWORD, create_test_user, get_test_connection};
pub(crate) use http::{assert_message, get_test_app_state};
