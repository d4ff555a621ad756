use anyhow::Context as _;
use chrono::NaiveDate;
use tracing::info;

use campus_auth_types::token::{Session, issue_session_token};
use campus_domain::role::Role;

use crate::domain::repository::{AccountRepository, EnrollmentRepository};
use crate::domain::types::{
    Account, AccountChanges, NewAccount, NewAccountDetails, Profile, normalize_class_name,
    validate_contact_number, validate_fees_paid, validate_gender, validate_name,
    validate_password, validate_salary,
};
use crate::error::SchoolServiceError;
use crate::infra::password::{hash_password, verify_password};

// ── Authorization ────────────────────────────────────────────────────────────

/// Admin-only operations.
pub fn ensure_admin(session: &Session) -> Result<(), SchoolServiceError> {
    if session.role != Role::Admin {
        return Err(SchoolServiceError::Forbidden);
    }
    Ok(())
}

/// The admin manages every account; anyone else only their own.
pub fn ensure_can_manage(
    session: &Session,
    role: Role,
    user_name: &str,
) -> Result<(), SchoolServiceError> {
    if session.role == Role::Admin || (session.role == role && session.user_name == user_name) {
        return Ok(());
    }
    Err(SchoolServiceError::Forbidden)
}

// ── Session ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct SessionOutput {
    pub token: String,
    pub expires_at: u64,
    pub role: Role,
    pub user_name: String,
}

fn issue_session(
    user_name: String,
    role: Role,
    jwt_secret: &str,
) -> Result<SessionOutput, SchoolServiceError> {
    let issued = issue_session_token(&user_name, role, jwt_secret).context("sign session token")?;
    Ok(SessionOutput {
        token: issued.token,
        expires_at: issued.expires_at,
        role,
        user_name,
    })
}

// ── Signup ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub user_name: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub contact_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub fees_paid: Option<i64>,
    pub class_name: Option<String>,
}

fn reject_foreign_field<T>(
    value: &Option<T>,
    field: &str,
    owner: &str,
) -> Result<(), SchoolServiceError> {
    if value.is_some() {
        return Err(SchoolServiceError::invalid(format!(
            "{field} only applies to {owner}"
        )));
    }
    Ok(())
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, SchoolServiceError> {
    value.ok_or_else(|| SchoolServiceError::invalid(format!("{field} is required")))
}

/// Validate the role's variant of the signup form and build its details.
fn signup_details(
    role: Role,
    input: &SignupInput,
) -> Result<NewAccountDetails, SchoolServiceError> {
    match role {
        Role::Admin => {
            reject_foreign_field(&input.date_of_birth, "dateOfBirth", "teachers and students")?;
            reject_foreign_field(&input.salary, "salary", "teachers")?;
            reject_foreign_field(&input.fees_paid, "feesPaid", "students")?;
            reject_foreign_field(&input.class_name, "className", "students")?;
            Ok(NewAccountDetails::Admin)
        }
        Role::Teacher => {
            reject_foreign_field(&input.fees_paid, "feesPaid", "students")?;
            reject_foreign_field(&input.class_name, "className", "students")?;
            let date_of_birth = required(input.date_of_birth, "dateOfBirth")?;
            let salary = required(input.salary, "salary")?;
            validate_salary(salary)?;
            Ok(NewAccountDetails::Teacher {
                date_of_birth,
                salary,
            })
        }
        Role::Student => {
            reject_foreign_field(&input.salary, "salary", "teachers")?;
            let date_of_birth = required(input.date_of_birth, "dateOfBirth")?;
            let fees_paid = required(input.fees_paid, "feesPaid")?;
            validate_fees_paid(fees_paid)?;
            let class_name = normalize_class_name(required(
                input.class_name.as_deref(),
                "className",
            )?)?;
            Ok(NewAccountDetails::Student {
                date_of_birth,
                fees_paid,
                class_name,
            })
        }
    }
}

pub struct SignupUseCase<A: AccountRepository, E: EnrollmentRepository> {
    pub accounts: A,
    pub enrollment: E,
    pub jwt_secret: String,
}

impl<A: AccountRepository, E: EnrollmentRepository> SignupUseCase<A, E> {
    /// Create the account and sign the caller in. Student signup enrolls the
    /// student into the requested class in the same step.
    pub async fn execute(
        &self,
        role: Role,
        input: SignupInput,
    ) -> Result<SessionOutput, SchoolServiceError> {
        let profile = Profile {
            user_name: input.user_name.trim().to_owned(),
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            gender: input.gender.trim().to_owned(),
            contact_number: input.contact_number.trim().to_owned(),
        };
        profile.validate()?;
        validate_password(&input.password)?;
        let details = signup_details(role, &input)?;

        let new_account = NewAccount {
            profile,
            password_hash: hash_password(input.password).await?,
            details,
        };

        let account = match new_account.details {
            NewAccountDetails::Student { ref class_name, .. } => {
                let account = self.enrollment.enroll(&new_account).await?;
                info!(
                    user_name = %account.profile.user_name,
                    class_name = %class_name,
                    "student enrolled"
                );
                account
            }
            _ => self.accounts.create(&new_account).await?,
        };
        info!(role = %role, user_name = %account.profile.user_name, "account created");

        issue_session(account.profile.user_name, role, &self.jwt_secret)
    }
}

// ── Signin ───────────────────────────────────────────────────────────────────

pub struct SigninInput {
    pub user_name: String,
    pub password: String,
}

pub struct SigninUseCase<A: AccountRepository> {
    pub accounts: A,
    pub jwt_secret: String,
}

impl<A: AccountRepository> SigninUseCase<A> {
    pub async fn execute(
        &self,
        role: Role,
        input: SigninInput,
    ) -> Result<SessionOutput, SchoolServiceError> {
        let user_name = input.user_name.trim();
        let credential = self
            .accounts
            .find_credential(role, user_name)
            .await?
            .ok_or(SchoolServiceError::AccountNotFound)?;
        if !verify_password(input.password, credential.password_hash).await? {
            return Err(SchoolServiceError::InvalidCredential);
        }
        issue_session(credential.user_name, credential.role, &self.jwt_secret)
    }
}

// ── UpdateAccount ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub fees_paid: Option<i64>,
}

impl UpdateAccountInput {
    fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.gender.is_none()
            && self.contact_number.is_none()
            && self.date_of_birth.is_none()
            && self.salary.is_none()
            && self.fees_paid.is_none()
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned())
}

pub struct UpdateAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> UpdateAccountUseCase<A> {
    pub async fn execute(
        &self,
        role: Role,
        user_name: &str,
        input: UpdateAccountInput,
    ) -> Result<Account, SchoolServiceError> {
        if input.is_empty() {
            return Err(SchoolServiceError::MissingData);
        }
        match role {
            Role::Admin => {
                reject_foreign_field(&input.date_of_birth, "dateOfBirth", "teachers and students")?;
                reject_foreign_field(&input.salary, "salary", "teachers")?;
                reject_foreign_field(&input.fees_paid, "feesPaid", "students")?;
            }
            Role::Teacher => reject_foreign_field(&input.fees_paid, "feesPaid", "students")?,
            Role::Student => reject_foreign_field(&input.salary, "salary", "teachers")?,
        }

        let mut changes = AccountChanges {
            password_hash: None,
            first_name: trimmed(input.first_name),
            last_name: trimmed(input.last_name),
            gender: trimmed(input.gender),
            contact_number: trimmed(input.contact_number),
            date_of_birth: input.date_of_birth,
            salary: input.salary,
            fees_paid: input.fees_paid,
        };
        if let Some(ref first_name) = changes.first_name {
            validate_name("firstName", first_name)?;
        }
        if let Some(ref last_name) = changes.last_name {
            validate_name("lastName", last_name)?;
        }
        if let Some(ref gender) = changes.gender {
            validate_gender(gender)?;
        }
        if let Some(ref contact_number) = changes.contact_number {
            validate_contact_number(contact_number)?;
        }
        if let Some(salary) = changes.salary {
            validate_salary(salary)?;
        }
        if let Some(fees_paid) = changes.fees_paid {
            validate_fees_paid(fees_paid)?;
        }
        if let Some(password) = input.password {
            validate_password(&password)?;
            changes.password_hash = Some(hash_password(password).await?);
        }

        if !self.accounts.update(role, user_name, &changes).await? {
            return Err(SchoolServiceError::AccountNotFound);
        }
        info!(role = %role, user_name, "account updated");
        self.accounts
            .find(role, user_name)
            .await?
            .ok_or(SchoolServiceError::AccountNotFound)
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> DeleteAccountUseCase<A> {
    pub async fn execute(&self, role: Role, user_name: &str) -> Result<(), SchoolServiceError> {
        if !self.accounts.delete(role, user_name).await? {
            return Err(SchoolServiceError::AccountNotFound);
        }
        info!(role = %role, user_name, "account deleted");
        Ok(())
    }
}
