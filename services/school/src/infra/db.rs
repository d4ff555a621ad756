use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{self, NotSet, Set},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionError, TransactionTrait, Value,
    sea_query::Expr,
};
use uuid::Uuid;

use campus_core::sea_ext::{contains_ci, is_foreign_key_violation, is_unique_violation};
use campus_domain::pagination::PageRequest;
use campus_domain::role::Role;
use campus_school_schema::{admins, classes, students, teachers};

use crate::domain::repository::{
    AccountRepository, ClassRepository, EnrollmentRepository, ReportRepository,
};
use crate::domain::types::{
    Account, AccountChanges, AccountDetails, Class, ClassChanges, ClassRoster, Credential,
    NewAccount, NewAccountDetails, NewClass, Profile,
};
use crate::error::SchoolServiceError;

fn set_opt<T>(value: &Option<T>) -> ActiveValue<T>
where
    T: Clone + Into<Value>,
{
    match value {
        Some(v) => Set(v.clone()),
        None => NotSet,
    }
}

fn internal(err: DbErr, operation: &'static str) -> SchoolServiceError {
    anyhow::Error::new(err).context(operation).into()
}

fn flatten_txn(
    err: TransactionError<SchoolServiceError>,
    operation: &'static str,
) -> SchoolServiceError {
    match err {
        TransactionError::Connection(e) => internal(e, operation),
        TransactionError::Transaction(e) => e,
    }
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find(
        &self,
        role: Role,
        user_name: &str,
    ) -> Result<Option<Account>, SchoolServiceError> {
        match role {
            Role::Admin => {
                let model = admins::Entity::find()
                    .filter(admins::Column::UserName.eq(user_name))
                    .one(&self.db)
                    .await
                    .with_context(|| format!("find admin {user_name}"))?;
                Ok(model.map(admin_from_model))
            }
            Role::Teacher => {
                let row = teachers::Entity::find()
                    .filter(teachers::Column::UserName.eq(user_name))
                    .find_also_related(classes::Entity)
                    .one(&self.db)
                    .await
                    .with_context(|| format!("find teacher {user_name}"))?;
                Ok(row.map(|(teacher, class)| teacher_from_model(teacher, class)))
            }
            Role::Student => {
                let row = students::Entity::find()
                    .filter(students::Column::UserName.eq(user_name))
                    .find_also_related(classes::Entity)
                    .one(&self.db)
                    .await
                    .with_context(|| format!("find student {user_name}"))?;
                row.map(|(student, class)| student_from_model(student, class))
                    .transpose()
            }
        }
    }

    async fn find_credential(
        &self,
        role: Role,
        user_name: &str,
    ) -> Result<Option<Credential>, SchoolServiceError> {
        let password_hash = match role {
            Role::Admin => admins::Entity::find()
                .filter(admins::Column::UserName.eq(user_name))
                .one(&self.db)
                .await
                .context("find admin credential")?
                .map(|m| m.password_hash),
            Role::Teacher => teachers::Entity::find()
                .filter(teachers::Column::UserName.eq(user_name))
                .one(&self.db)
                .await
                .context("find teacher credential")?
                .map(|m| m.password_hash),
            Role::Student => students::Entity::find()
                .filter(students::Column::UserName.eq(user_name))
                .one(&self.db)
                .await
                .context("find student credential")?
                .map(|m| m.password_hash),
        };
        Ok(password_hash.map(|password_hash| Credential {
            user_name: user_name.to_owned(),
            role,
            password_hash,
        }))
    }

    async fn create(&self, account: &NewAccount) -> Result<Account, SchoolServiceError> {
        let now = Utc::now();
        let profile = &account.profile;
        match account.details {
            NewAccountDetails::Admin => {
                let model = admins::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    user_name: Set(profile.user_name.clone()),
                    password_hash: Set(account.password_hash.clone()),
                    first_name: Set(profile.first_name.clone()),
                    last_name: Set(profile.last_name.clone()),
                    gender: Set(profile.gender.clone()),
                    contact_number: Set(profile.contact_number.clone()),
                    singleton: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(|e| {
                    // A taken user name and a second admin both hit a unique index.
                    if is_unique_violation(&e) {
                        SchoolServiceError::AdminAlreadyExists
                    } else {
                        internal(e, "create admin")
                    }
                })?;
                Ok(admin_from_model(model))
            }
            NewAccountDetails::Teacher {
                date_of_birth,
                salary,
            } => {
                let model = teachers::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    user_name: Set(profile.user_name.clone()),
                    password_hash: Set(account.password_hash.clone()),
                    first_name: Set(profile.first_name.clone()),
                    last_name: Set(profile.last_name.clone()),
                    gender: Set(profile.gender.clone()),
                    contact_number: Set(profile.contact_number.clone()),
                    date_of_birth: Set(date_of_birth),
                    salary: Set(salary),
                    assigned_class_id: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        SchoolServiceError::AccountAlreadyExists
                    } else {
                        internal(e, "create teacher")
                    }
                })?;
                Ok(teacher_from_model(model, None))
            }
            NewAccountDetails::Student { .. } => Err(SchoolServiceError::invalid(
                "students are created by enrolling into a class",
            )),
        }
    }

    async fn update(
        &self,
        role: Role,
        user_name: &str,
        changes: &AccountChanges,
    ) -> Result<bool, SchoolServiceError> {
        let now = Utc::now();
        let result = match role {
            Role::Admin => {
                let am = admins::ActiveModel {
                    password_hash: set_opt(&changes.password_hash),
                    first_name: set_opt(&changes.first_name),
                    last_name: set_opt(&changes.last_name),
                    gender: set_opt(&changes.gender),
                    contact_number: set_opt(&changes.contact_number),
                    updated_at: Set(now),
                    ..Default::default()
                };
                admins::Entity::update_many()
                    .set(am)
                    .filter(admins::Column::UserName.eq(user_name))
                    .exec(&self.db)
                    .await
                    .with_context(|| format!("update admin {user_name}"))?
            }
            Role::Teacher => {
                let am = teachers::ActiveModel {
                    password_hash: set_opt(&changes.password_hash),
                    first_name: set_opt(&changes.first_name),
                    last_name: set_opt(&changes.last_name),
                    gender: set_opt(&changes.gender),
                    contact_number: set_opt(&changes.contact_number),
                    date_of_birth: set_opt(&changes.date_of_birth),
                    salary: set_opt(&changes.salary),
                    updated_at: Set(now),
                    ..Default::default()
                };
                teachers::Entity::update_many()
                    .set(am)
                    .filter(teachers::Column::UserName.eq(user_name))
                    .exec(&self.db)
                    .await
                    .with_context(|| format!("update teacher {user_name}"))?
            }
            Role::Student => {
                let am = students::ActiveModel {
                    password_hash: set_opt(&changes.password_hash),
                    first_name: set_opt(&changes.first_name),
                    last_name: set_opt(&changes.last_name),
                    gender: set_opt(&changes.gender),
                    contact_number: set_opt(&changes.contact_number),
                    date_of_birth: set_opt(&changes.date_of_birth),
                    fees_paid: set_opt(&changes.fees_paid),
                    updated_at: Set(now),
                    ..Default::default()
                };
                students::Entity::update_many()
                    .set(am)
                    .filter(students::Column::UserName.eq(user_name))
                    .exec(&self.db)
                    .await
                    .with_context(|| format!("update student {user_name}"))?
            }
        };
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, role: Role, user_name: &str) -> Result<bool, SchoolServiceError> {
        let result = match role {
            Role::Admin => admins::Entity::delete_many()
                .filter(admins::Column::UserName.eq(user_name))
                .exec(&self.db)
                .await
                .with_context(|| format!("delete admin {user_name}"))?,
            Role::Teacher => teachers::Entity::delete_many()
                .filter(teachers::Column::UserName.eq(user_name))
                .exec(&self.db)
                .await
                .with_context(|| format!("delete teacher {user_name}"))?,
            Role::Student => {
                let user_name = user_name.to_owned();
                return self
                    .db
                    .transaction::<_, bool, SchoolServiceError>(|txn| {
                        Box::pin(async move {
                            let Some(student) = students::Entity::find()
                                .filter(students::Column::UserName.eq(user_name.as_str()))
                                .one(txn)
                                .await
                                .context("find student to delete")?
                            else {
                                return Ok(false);
                            };
                            students::Entity::delete_by_id(student.id)
                                .exec(txn)
                                .await
                                .context("delete student")?;
                            // Free the seat.
                            classes::Entity::update_many()
                                .col_expr(
                                    classes::Column::CurrentStudents,
                                    Expr::col(classes::Column::CurrentStudents).sub(1),
                                )
                                .col_expr(classes::Column::UpdatedAt, Expr::value(Utc::now()))
                                .filter(classes::Column::Id.eq(student.class_id))
                                .filter(Expr::col(classes::Column::CurrentStudents).gt(0))
                                .exec(txn)
                                .await
                                .context("release class seat")?;
                            Ok(true)
                        })
                    })
                    .await
                    .map_err(|e| flatten_txn(e, "delete student"));
            }
        };
        Ok(result.rows_affected > 0)
    }

    async fn search(
        &self,
        role: Role,
        filter: &str,
        page: PageRequest,
    ) -> Result<Vec<Account>, SchoolServiceError> {
        let offset = page.offset();
        let limit = u64::from(page.limit);
        match role {
            Role::Admin => {
                let mut query = admins::Entity::find();
                if !filter.is_empty() {
                    query = query.filter(
                        Condition::any()
                            .add(contains_ci(admins::Column::UserName, filter))
                            .add(contains_ci(admins::Column::FirstName, filter))
                            .add(contains_ci(admins::Column::LastName, filter)),
                    );
                }
                let models = query
                    .order_by_asc(admins::Column::UserName)
                    .offset(offset)
                    .limit(limit)
                    .all(&self.db)
                    .await
                    .context("search admins")?;
                Ok(models.into_iter().map(admin_from_model).collect())
            }
            Role::Teacher => {
                let mut query = teachers::Entity::find().find_also_related(classes::Entity);
                if !filter.is_empty() {
                    query = query.filter(
                        Condition::any()
                            .add(contains_ci(teachers::Column::UserName, filter))
                            .add(contains_ci(teachers::Column::FirstName, filter))
                            .add(contains_ci(teachers::Column::LastName, filter))
                            .add(contains_ci(teachers::Column::Gender, filter)),
                    );
                }
                let rows = query
                    .order_by_asc(teachers::Column::UserName)
                    .offset(offset)
                    .limit(limit)
                    .all(&self.db)
                    .await
                    .context("search teachers")?;
                Ok(rows
                    .into_iter()
                    .map(|(teacher, class)| teacher_from_model(teacher, class))
                    .collect())
            }
            Role::Student => {
                let mut query = students::Entity::find().find_also_related(classes::Entity);
                if !filter.is_empty() {
                    query = query.filter(
                        Condition::any()
                            .add(contains_ci(students::Column::UserName, filter))
                            .add(contains_ci(students::Column::FirstName, filter))
                            .add(contains_ci(students::Column::LastName, filter))
                            .add(contains_ci(students::Column::Gender, filter)),
                    );
                }
                let rows = query
                    .order_by_asc(students::Column::UserName)
                    .offset(offset)
                    .limit(limit)
                    .all(&self.db)
                    .await
                    .context("search students")?;
                rows.into_iter()
                    .map(|(student, class)| student_from_model(student, class))
                    .collect()
            }
        }
    }
}

fn admin_from_model(model: admins::Model) -> Account {
    Account {
        id: model.id,
        profile: Profile {
            user_name: model.user_name,
            first_name: model.first_name,
            last_name: model.last_name,
            gender: model.gender,
            contact_number: model.contact_number,
        },
        details: AccountDetails::Admin,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn teacher_from_model(model: teachers::Model, class: Option<classes::Model>) -> Account {
    Account {
        id: model.id,
        profile: Profile {
            user_name: model.user_name,
            first_name: model.first_name,
            last_name: model.last_name,
            gender: model.gender,
            contact_number: model.contact_number,
        },
        details: AccountDetails::Teacher {
            date_of_birth: model.date_of_birth,
            salary: model.salary,
            assigned_class: class.map(|c| c.class_name),
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn student_from_model(
    model: students::Model,
    class: Option<classes::Model>,
) -> Result<Account, SchoolServiceError> {
    let class = class.with_context(|| format!("student {} has no class row", model.user_name))?;
    Ok(Account {
        id: model.id,
        profile: Profile {
            user_name: model.user_name,
            first_name: model.first_name,
            last_name: model.last_name,
            gender: model.gender,
            contact_number: model.contact_number,
        },
        details: AccountDetails::Student {
            date_of_birth: model.date_of_birth,
            fees_paid: model.fees_paid,
            class_name: class.class_name,
            enrolled_at: model.enrolled_at,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn enroll(&self, student: &NewAccount) -> Result<Account, SchoolServiceError> {
        let NewAccountDetails::Student {
            date_of_birth,
            fees_paid,
            ref class_name,
        } = student.details
        else {
            return Err(SchoolServiceError::invalid(
                "only students can enroll into a class",
            ));
        };
        let class_name = class_name.clone();
        let profile = student.profile.clone();
        let password_hash = student.password_hash.clone();

        self.db
            .transaction::<_, Account, SchoolServiceError>(|txn| {
                Box::pin(async move {
                    let class = classes::Entity::find()
                        .filter(classes::Column::ClassName.eq(class_name.as_str()))
                        .one(txn)
                        .await
                        .context("find class for enrollment")?
                        .ok_or(SchoolServiceError::ClassNotFound)?;

                    let now = Utc::now();
                    // Seat check and increment in one statement.
                    let seat = classes::Entity::update_many()
                        .col_expr(
                            classes::Column::CurrentStudents,
                            Expr::col(classes::Column::CurrentStudents).add(1),
                        )
                        .col_expr(classes::Column::UpdatedAt, Expr::value(now))
                        .filter(classes::Column::Id.eq(class.id))
                        .filter(
                            Expr::col(classes::Column::CurrentStudents)
                                .lt(Expr::col(classes::Column::MaxStudents)),
                        )
                        .exec(txn)
                        .await
                        .context("take class seat")?;
                    if seat.rows_affected == 0 {
                        let still_there = classes::Entity::find_by_id(class.id)
                            .one(txn)
                            .await
                            .context("recheck class")?;
                        return Err(match still_there {
                            Some(_) => SchoolServiceError::ClassFull,
                            None => SchoolServiceError::ClassNotFound,
                        });
                    }

                    let model = students::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        user_name: Set(profile.user_name),
                        password_hash: Set(password_hash),
                        first_name: Set(profile.first_name),
                        last_name: Set(profile.last_name),
                        gender: Set(profile.gender),
                        contact_number: Set(profile.contact_number),
                        date_of_birth: Set(date_of_birth),
                        fees_paid: Set(fees_paid),
                        class_id: Set(class.id),
                        enrolled_at: Set(now),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            SchoolServiceError::AccountAlreadyExists
                        } else {
                            internal(e, "insert enrolled student")
                        }
                    })?;

                    student_from_model(model, Some(class))
                })
            })
            .await
            .map_err(|e| flatten_txn(e, "enroll student"))
    }
}

// ── Class repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClassRepository {
    pub db: DatabaseConnection,
}

impl ClassRepository for DbClassRepository {
    async fn find_by_name(&self, class_name: &str) -> Result<Option<Class>, SchoolServiceError> {
        let model = classes::Entity::find()
            .filter(classes::Column::ClassName.eq(class_name))
            .one(&self.db)
            .await
            .with_context(|| format!("find class {class_name}"))?;
        Ok(model.map(class_from_model))
    }

    async fn create(&self, class: &NewClass) -> Result<Class, SchoolServiceError> {
        let now = Utc::now();
        let model = classes::ActiveModel {
            id: Set(Uuid::now_v7()),
            class_name: Set(class.class_name.clone()),
            teacher_name: Set(class.teacher_name.clone()),
            year: Set(class.year),
            students_fees: Set(class.students_fees),
            max_students: Set(class.max_students),
            current_students: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                SchoolServiceError::ClassAlreadyExists
            } else {
                internal(e, "create class")
            }
        })?;
        Ok(class_from_model(model))
    }

    async fn update(
        &self,
        class_name: &str,
        changes: &ClassChanges,
    ) -> Result<Class, SchoolServiceError> {
        let am = classes::ActiveModel {
            teacher_name: set_opt(&changes.teacher_name),
            year: set_opt(&changes.year),
            students_fees: set_opt(&changes.students_fees),
            max_students: set_opt(&changes.max_students),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let mut query = classes::Entity::update_many()
            .set(am)
            .filter(classes::Column::ClassName.eq(class_name));
        if let Some(max_students) = changes.max_students {
            query = query.filter(classes::Column::CurrentStudents.lte(max_students));
        }
        let result = query
            .exec(&self.db)
            .await
            .with_context(|| format!("update class {class_name}"))?;

        let current = self.find_by_name(class_name).await?;
        match (result.rows_affected, current) {
            (_, None) => Err(SchoolServiceError::ClassNotFound),
            (0, Some(_)) => Err(SchoolServiceError::CapacityBelowEnrollment),
            (_, Some(class)) => Ok(class),
        }
    }

    async fn delete(&self, class_name: &str) -> Result<(), SchoolServiceError> {
        let result = classes::Entity::delete_many()
            .filter(classes::Column::ClassName.eq(class_name))
            .filter(classes::Column::CurrentStudents.eq(0))
            .exec(&self.db)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    SchoolServiceError::ClassNotEmpty
                } else {
                    internal(e, "delete class")
                }
            })?;
        if result.rows_affected > 0 {
            return Ok(());
        }
        match self.find_by_name(class_name).await? {
            Some(_) => Err(SchoolServiceError::ClassNotEmpty),
            None => Err(SchoolServiceError::ClassNotFound),
        }
    }

    async fn search(
        &self,
        filter: &str,
        page: PageRequest,
    ) -> Result<Vec<Class>, SchoolServiceError> {
        let mut query = classes::Entity::find();
        if !filter.is_empty() {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(classes::Column::ClassName, filter))
                    .add(contains_ci(classes::Column::TeacherName, filter)),
            );
        }
        let models = query
            .order_by_asc(classes::Column::ClassName)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("search classes")?;
        Ok(models.into_iter().map(class_from_model).collect())
    }

    async fn assign_teacher(
        &self,
        teacher_user_name: &str,
        class_name: &str,
    ) -> Result<(), SchoolServiceError> {
        let class = self
            .find_by_name(class_name)
            .await?
            .ok_or(SchoolServiceError::ClassNotFound)?;
        let result = teachers::Entity::update_many()
            .col_expr(teachers::Column::AssignedClassId, Expr::value(class.id))
            .col_expr(teachers::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(teachers::Column::UserName.eq(teacher_user_name))
            .exec(&self.db)
            .await
            .with_context(|| format!("assign {teacher_user_name} to {class_name}"))?;
        if result.rows_affected == 0 {
            return Err(SchoolServiceError::AccountNotFound);
        }
        Ok(())
    }
}

fn class_from_model(model: classes::Model) -> Class {
    Class {
        id: model.id,
        class_name: model.class_name,
        teacher_name: model.teacher_name,
        year: model.year,
        students_fees: model.students_fees,
        max_students: model.max_students,
        current_students: model.current_students,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Report repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReportRepository {
    pub db: DatabaseConnection,
}

impl ReportRepository for DbReportRepository {
    async fn class_rosters(&self) -> Result<Vec<ClassRoster>, SchoolServiceError> {
        let classes = classes::Entity::find()
            .order_by_asc(classes::Column::ClassName)
            .all(&self.db)
            .await
            .context("list classes for analytics")?;
        let enrolled = students::Entity::find()
            .select_only()
            .column(students::Column::ClassId)
            .column(students::Column::UserName)
            .order_by_asc(students::Column::EnrolledAt)
            .into_tuple::<(Uuid, String)>()
            .all(&self.db)
            .await
            .context("list enrolled students for analytics")?;

        let mut by_class: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (class_id, user_name) in enrolled {
            by_class.entry(class_id).or_default().push(user_name);
        }
        Ok(classes
            .into_iter()
            .map(|model| {
                let students = by_class.remove(&model.id).unwrap_or_default();
                ClassRoster {
                    class: class_from_model(model),
                    students,
                }
            })
            .collect())
    }

    async fn student_genders(&self) -> Result<Vec<String>, SchoolServiceError> {
        let genders = students::Entity::find()
            .select_only()
            .column(students::Column::Gender)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .context("list student genders")?;
        Ok(genders)
    }

    async fn student_fees(&self) -> Result<Vec<i64>, SchoolServiceError> {
        let fees = students::Entity::find()
            .select_only()
            .column(students::Column::FeesPaid)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .context("list student fees")?;
        Ok(fees)
    }

    async fn teacher_salaries(&self) -> Result<Vec<i64>, SchoolServiceError> {
        let salaries = teachers::Entity::find()
            .select_only()
            .column(teachers::Column::Salary)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .context("list teacher salaries")?;
        Ok(salaries)
    }
}
