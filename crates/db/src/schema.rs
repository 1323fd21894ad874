//! MySQL DDL for every table the server owns.
//!
//! Tables carry no foreign keys here; the request/fulfillment links are added
//! by the seed sequence once all tables exist.

/// A table definition: its name and the statement that creates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub create: &'static str,
}

pub const ROLES: TableSchema = TableSchema {
    name: "roles",
    create: r#"
CREATE TABLE roles (
    id INT NOT NULL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const USERS: TableSchema = TableSchema {
    name: "users",
    create: r#"
CREATE TABLE users (
    id INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

/// Join table keyed on username, not on the user's surrogate id.
pub const USER_ROLES: TableSchema = TableSchema {
    name: "user_roles",
    create: r#"
CREATE TABLE user_roles (
    roleId INT NOT NULL,
    username VARCHAR(255) NOT NULL,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
    PRIMARY KEY (roleId, username)
)"#,
};

pub const ITEMS: TableSchema = TableSchema {
    name: "items",
    create: r#"
CREATE TABLE items (
    itemId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT NULL,
    quantity INT NOT NULL DEFAULT 0,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const SERVICES: TableSchema = TableSchema {
    name: "services",
    create: r#"
CREATE TABLE services (
    serviceId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT NULL,
    available BOOLEAN NOT NULL DEFAULT TRUE,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const STUDENT_ITEM_REQUESTS: TableSchema = TableSchema {
    name: "student_item_requests",
    create: r#"
CREATE TABLE student_item_requests (
    requestId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(255) NOT NULL,
    itemId INT NOT NULL,
    quantity INT NOT NULL DEFAULT 1,
    reason TEXT NULL,
    status VARCHAR(32) NOT NULL DEFAULT 'pending',
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const STUDENT_SERVICE_REQUESTS: TableSchema = TableSchema {
    name: "student_service_requests",
    create: r#"
CREATE TABLE student_service_requests (
    requestId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(255) NOT NULL,
    serviceId INT NOT NULL,
    reason TEXT NULL,
    status VARCHAR(32) NOT NULL DEFAULT 'pending',
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const ACADEMIC_ITEM_REQUESTS: TableSchema = TableSchema {
    name: "academic_item_requests",
    create: r#"
CREATE TABLE academic_item_requests (
    requestId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(255) NOT NULL,
    itemId INT NOT NULL,
    quantity INT NOT NULL DEFAULT 1,
    reason TEXT NULL,
    status VARCHAR(32) NOT NULL DEFAULT 'pending',
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const ACADEMIC_SERVICE_REQUESTS: TableSchema = TableSchema {
    name: "academic_service_requests",
    create: r#"
CREATE TABLE academic_service_requests (
    requestId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(255) NOT NULL,
    serviceId INT NOT NULL,
    reason TEXT NULL,
    status VARCHAR(32) NOT NULL DEFAULT 'pending',
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

/// Student item requests that an academic reviewer has acted on. `requestId`
/// carries over from `student_item_requests`.
pub const REVIEWED_ITEM_REQUESTS: TableSchema = TableSchema {
    name: "reviewed_item_requests",
    create: r#"
CREATE TABLE reviewed_item_requests (
    requestId INT NOT NULL PRIMARY KEY,
    reviewer VARCHAR(255) NOT NULL,
    status VARCHAR(32) NOT NULL,
    remarks TEXT NULL,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const REVIEWED_SERVICE_REQUESTS: TableSchema = TableSchema {
    name: "reviewed_service_requests",
    create: r#"
CREATE TABLE reviewed_service_requests (
    requestId INT NOT NULL PRIMARY KEY,
    reviewer VARCHAR(255) NOT NULL,
    status VARCHAR(32) NOT NULL,
    remarks TEXT NULL,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const ISSUED_ACA_ITEM_REQUESTS: TableSchema = TableSchema {
    name: "issued_aca_item_requests",
    create: r#"
CREATE TABLE issued_aca_item_requests (
    issueId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    requestId INT NOT NULL,
    issuedBy VARCHAR(255) NOT NULL,
    quantity INT NOT NULL DEFAULT 1,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const ISSUED_STUD_ITEM_REQUESTS: TableSchema = TableSchema {
    name: "issued_stud_item_requests",
    create: r#"
CREATE TABLE issued_stud_item_requests (
    issueId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    requestId INT NOT NULL,
    issuedBy VARCHAR(255) NOT NULL,
    quantity INT NOT NULL DEFAULT 1,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const PROCEEDED_ACA_SERVICE_REQUESTS: TableSchema = TableSchema {
    name: "proceeded_aca_service_requests",
    create: r#"
CREATE TABLE proceeded_aca_service_requests (
    proceedId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    requestId INT NOT NULL,
    proceededBy VARCHAR(255) NOT NULL,
    remarks TEXT NULL,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

pub const PROCEEDED_STUD_SERVICE_REQUESTS: TableSchema = TableSchema {
    name: "proceeded_stud_service_requests",
    create: r#"
CREATE TABLE proceeded_stud_service_requests (
    proceedId INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    requestId INT NOT NULL,
    proceededBy VARCHAR(255) NOT NULL,
    remarks TEXT NULL,
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"#,
};

/// Every table, in creation order.
pub const ALL: [TableSchema; 15] = [
    ROLES,
    USERS,
    ITEMS,
    SERVICES,
    USER_ROLES,
    STUDENT_ITEM_REQUESTS,
    STUDENT_SERVICE_REQUESTS,
    ACADEMIC_ITEM_REQUESTS,
    ACADEMIC_SERVICE_REQUESTS,
    REVIEWED_ITEM_REQUESTS,
    REVIEWED_SERVICE_REQUESTS,
    ISSUED_ACA_ITEM_REQUESTS,
    ISSUED_STUD_ITEM_REQUESTS,
    PROCEEDED_ACA_SERVICE_REQUESTS,
    PROCEEDED_STUD_SERVICE_REQUESTS,
];

/// Returns true when `name` is safe to splice into a statement as a table name.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
