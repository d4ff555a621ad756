#![allow(async_fn_in_trait)]

use campus_domain::pagination::PageRequest;
use campus_domain::role::Role;

use crate::domain::types::{
    Account, AccountChanges, Class, ClassChanges, ClassRoster, Credential, NewAccount, NewClass,
};
use crate::error::SchoolServiceError;

/// Repository for admin, teacher and student accounts.
pub trait AccountRepository: Send + Sync {
    async fn find(&self, role: Role, user_name: &str)
    -> Result<Option<Account>, SchoolServiceError>;

    async fn find_credential(
        &self,
        role: Role,
        user_name: &str,
    ) -> Result<Option<Credential>, SchoolServiceError>;

    /// Persist an admin or teacher. Students are created by
    /// [`EnrollmentRepository::enroll`].
    ///
    /// Fails with `AccountAlreadyExists` on a taken user name and with
    /// `AdminAlreadyExists` when an admin is already present.
    async fn create(&self, account: &NewAccount) -> Result<Account, SchoolServiceError>;

    /// Apply `changes`. Returns `false` if no such account exists.
    async fn update(
        &self,
        role: Role,
        user_name: &str,
        changes: &AccountChanges,
    ) -> Result<bool, SchoolServiceError>;

    /// Delete an account. Deleting a student frees its class seat in the same
    /// transaction. Returns `false` if no row was deleted.
    async fn delete(&self, role: Role, user_name: &str) -> Result<bool, SchoolServiceError>;

    /// Case-insensitive substring search, ordered by user name.
    async fn search(
        &self,
        role: Role,
        filter: &str,
        page: PageRequest,
    ) -> Result<Vec<Account>, SchoolServiceError>;
}

/// Seat-limited student enrollment.
pub trait EnrollmentRepository: Send + Sync {
    /// Take a seat in the student's class and create the student, atomically.
    ///
    /// Fails with `ClassNotFound`, `ClassFull` or `AccountAlreadyExists`; on
    /// failure nothing is written.
    async fn enroll(&self, student: &NewAccount) -> Result<Account, SchoolServiceError>;
}

/// Repository for classes.
pub trait ClassRepository: Send + Sync {
    async fn find_by_name(&self, class_name: &str) -> Result<Option<Class>, SchoolServiceError>;

    /// Fails with `ClassAlreadyExists` on a taken name.
    async fn create(&self, class: &NewClass) -> Result<Class, SchoolServiceError>;

    /// Fails with `ClassNotFound`, or `CapacityBelowEnrollment` when
    /// `max_students` would drop below the current enrollment.
    async fn update(
        &self,
        class_name: &str,
        changes: &ClassChanges,
    ) -> Result<Class, SchoolServiceError>;

    /// Delete an empty class. Fails with `ClassNotFound` or `ClassNotEmpty`.
    async fn delete(&self, class_name: &str) -> Result<(), SchoolServiceError>;

    async fn search(
        &self,
        filter: &str,
        page: PageRequest,
    ) -> Result<Vec<Class>, SchoolServiceError>;

    /// Point a teacher at a class. Fails with `AccountNotFound` or `ClassNotFound`.
    async fn assign_teacher(
        &self,
        teacher_user_name: &str,
        class_name: &str,
    ) -> Result<(), SchoolServiceError>;
}

/// Read-only aggregates for the admin dashboard.
pub trait ReportRepository: Send + Sync {
    /// Every class with its roster, classes ordered by name.
    async fn class_rosters(&self) -> Result<Vec<ClassRoster>, SchoolServiceError>;

    async fn student_genders(&self) -> Result<Vec<String>, SchoolServiceError>;

    async fn student_fees(&self) -> Result<Vec<i64>, SchoolServiceError>;

    async fn teacher_salaries(&self) -> Result<Vec<i64>, SchoolServiceError>;
}
