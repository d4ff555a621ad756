use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use campus_domain::role::Role;

use crate::error::SchoolServiceError;

/// Default seat limit for a class created without `maxStudents`.
pub const DEFAULT_MAX_STUDENTS: i32 = 30;
/// Largest seat limit a class may have.
pub const MAX_STUDENTS_LIMIT: i32 = 100;
/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

// ── Accounts ─────────────────────────────────────────────────────────────────

/// Fields every account carries regardless of role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub contact_number: String,
}

/// A persisted account. The password hash is never part of this type.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub profile: Profile,
    pub details: AccountDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role-specific attributes of an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountDetails {
    Admin,
    Teacher {
        date_of_birth: NaiveDate,
        salary: i64,
        assigned_class: Option<String>,
    },
    Student {
        date_of_birth: NaiveDate,
        fees_paid: i64,
        class_name: String,
        enrolled_at: DateTime<Utc>,
    },
}

impl AccountDetails {
    pub fn role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Teacher { .. } => Role::Teacher,
            Self::Student { .. } => Role::Student,
        }
    }
}

impl Account {
    pub fn role(&self) -> Role {
        self.details.role()
    }
}

/// Stored secret for signin.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user_name: String,
    pub role: Role,
    pub password_hash: String,
}

/// A validated signup, ready to persist.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub profile: Profile,
    pub password_hash: String,
    pub details: NewAccountDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewAccountDetails {
    Admin,
    Teacher {
        date_of_birth: NaiveDate,
        salary: i64,
    },
    /// Students are created by enrolling into `class_name`.
    Student {
        date_of_birth: NaiveDate,
        fees_paid: i64,
        class_name: String,
    },
}

impl NewAccount {
    pub fn role(&self) -> Role {
        match self.details {
            NewAccountDetails::Admin => Role::Admin,
            NewAccountDetails::Teacher { .. } => Role::Teacher,
            NewAccountDetails::Student { .. } => Role::Student,
        }
    }
}

/// Partial update of an account. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub fees_paid: Option<i64>,
}

// ── Classes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Class {
    pub id: Uuid,
    pub class_name: String,
    pub teacher_name: String,
    pub year: i32,
    pub students_fees: i64,
    pub max_students: i32,
    pub current_students: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Class {
    pub fn available_slots(&self) -> i32 {
        (self.max_students - self.current_students).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.current_students >= self.max_students
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub class_name: String,
    pub teacher_name: String,
    pub year: i32,
    pub students_fees: i64,
    pub max_students: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassChanges {
    pub teacher_name: Option<String>,
    pub year: Option<i32>,
    pub students_fees: Option<i64>,
    pub max_students: Option<i32>,
}

impl ClassChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A class together with its enrolled students, oldest enrollment first.
#[derive(Debug, Clone)]
pub struct ClassRoster {
    pub class: Class,
    pub students: Vec<String>,
}

// ── Reports ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderCount {
    pub male: u64,
    pub female: u64,
    pub other: u64,
}

impl GenderCount {
    /// Case-insensitive bucketing; anything but male/female counts as other.
    pub fn record(&mut self, gender: &str) {
        match gender.trim().to_lowercase().as_str() {
            "male" => self.male += 1,
            "female" => self.female += 1,
            _ => self.other += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinancialSummary {
    pub total_fees_paid: i64,
    pub total_salaries: i64,
    pub student_count: u64,
    pub teacher_count: u64,
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Email-shaped identifier, 3 to 50 characters.
pub fn validate_user_name(user_name: &str) -> Result<(), SchoolServiceError> {
    let len = user_name.chars().count();
    if !(3..=50).contains(&len) || user_name.chars().any(char::is_whitespace) {
        return Err(SchoolServiceError::invalid(
            "userName must be an email of 3 to 50 characters",
        ));
    }
    let Some((local, domain)) = user_name.split_once('@') else {
        return Err(SchoolServiceError::invalid("userName must be an email"));
    };
    let domain_ok = !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok {
        return Err(SchoolServiceError::invalid("userName must be an email"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), SchoolServiceError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SchoolServiceError::invalid(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_name(field: &str, value: &str) -> Result<(), SchoolServiceError> {
    let len = value.trim().chars().count();
    if len == 0 || len > 255 {
        return Err(SchoolServiceError::invalid(format!(
            "{field} must be 1 to 255 characters"
        )));
    }
    Ok(())
}

pub fn validate_gender(gender: &str) -> Result<(), SchoolServiceError> {
    let len = gender.trim().chars().count();
    if len == 0 || len > 12 {
        return Err(SchoolServiceError::invalid(
            "gender must be 1 to 12 characters",
        ));
    }
    Ok(())
}

/// Exactly ten ASCII digits.
pub fn validate_contact_number(contact_number: &str) -> Result<(), SchoolServiceError> {
    if contact_number.len() != 10 || !contact_number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SchoolServiceError::invalid(
            "contactNumber must be exactly 10 digits",
        ));
    }
    Ok(())
}

pub fn validate_salary(salary: i64) -> Result<(), SchoolServiceError> {
    if salary <= 0 {
        return Err(SchoolServiceError::invalid("salary must be positive"));
    }
    Ok(())
}

pub fn validate_fees_paid(fees_paid: i64) -> Result<(), SchoolServiceError> {
    if fees_paid < 0 {
        return Err(SchoolServiceError::invalid("feesPaid must not be negative"));
    }
    Ok(())
}

/// Trim and lowercase a class name, rejecting lengths outside 3 to 50.
pub fn normalize_class_name(raw: &str) -> Result<String, SchoolServiceError> {
    let name = raw.trim().to_lowercase();
    let len = name.chars().count();
    if !(3..=50).contains(&len) {
        return Err(SchoolServiceError::invalid(
            "className must be 3 to 50 characters",
        ));
    }
    Ok(name)
}

pub fn validate_teacher_name(teacher_name: &str) -> Result<(), SchoolServiceError> {
    let len = teacher_name.trim().chars().count();
    if !(3..=255).contains(&len) {
        return Err(SchoolServiceError::invalid(
            "teacherName must be 3 to 255 characters",
        ));
    }
    Ok(())
}

pub fn validate_max_students(max_students: i32) -> Result<(), SchoolServiceError> {
    if !(1..=MAX_STUDENTS_LIMIT).contains(&max_students) {
        return Err(SchoolServiceError::invalid(format!(
            "maxStudents must be 1 to {MAX_STUDENTS_LIMIT}"
        )));
    }
    Ok(())
}

pub fn validate_students_fees(students_fees: i64) -> Result<(), SchoolServiceError> {
    if students_fees <= 0 {
        return Err(SchoolServiceError::invalid("studentsFees must be positive"));
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), SchoolServiceError> {
    if !(1900..=2100).contains(&year) {
        return Err(SchoolServiceError::invalid("year must be 1900 to 2100"));
    }
    Ok(())
}

impl Profile {
    pub fn validate(&self) -> Result<(), SchoolServiceError> {
        validate_user_name(&self.user_name)?;
        validate_name("firstName", &self.first_name)?;
        validate_name("lastName", &self.last_name)?;
        validate_gender(&self.gender)?;
        validate_contact_number(&self.contact_number)
    }
}

impl NewClass {
    /// Validate every field and lowercase the class name.
    pub fn normalized(mut self) -> Result<Self, SchoolServiceError> {
        self.class_name = normalize_class_name(&self.class_name)?;
        self.teacher_name = self.teacher_name.trim().to_owned();
        validate_teacher_name(&self.teacher_name)?;
        validate_year(self.year)?;
        validate_students_fees(self.students_fees)?;
        validate_max_students(self.max_students)?;
        Ok(self)
    }
}

impl ClassChanges {
    pub fn validate(&self) -> Result<(), SchoolServiceError> {
        if self.is_empty() {
            return Err(SchoolServiceError::MissingData);
        }
        if let Some(ref teacher_name) = self.teacher_name {
            validate_teacher_name(teacher_name)?;
        }
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        if let Some(fees) = self.students_fees {
            validate_students_fees(fees)?;
        }
        if let Some(max) = self.max_students {
            validate_max_students(max)?;
        }
        Ok(())
    }
}
