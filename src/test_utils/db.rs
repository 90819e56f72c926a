use std::str::FromStr;

use email_address::EmailAddress;
use rusqlite::Connection;

use crate::{
    auth::{NewUser, PasswordHash, User, ValidatedPassword, create_user},
    db::initialize,
};

pub(crate) const TEST_PASSWORD: &str = "averysafeandsecurepassword";

/// An in-memory database with all tables created and default categories seeded.
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().unwrap();
    initialize(&connection).unwrap();
    connection
}

#[track_caller]
pub(crate) fn create_test_user(email: &str, connection: &Connection) -> User {
    create_user(
        NewUser {
            name: "Test User".to_owned(),
            email: EmailAddress::from_str(email).unwrap(),
            password_hash: PasswordHash::new(ValidatedPassword::new_unchecked(TEST_PASSWORD), 4)
                .unwrap(),
        },
        connection,
    )
    .unwrap()
}
