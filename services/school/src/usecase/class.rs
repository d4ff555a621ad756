use tracing::info;

use crate::domain::repository::ClassRepository;
use crate::domain::types::{
    Class, ClassChanges, DEFAULT_MAX_STUDENTS, NewClass, normalize_class_name,
};
use crate::error::SchoolServiceError;

// ── CreateClass ──────────────────────────────────────────────────────────────

pub struct CreateClassInput {
    pub class_name: String,
    pub teacher_name: String,
    pub year: i32,
    pub students_fees: i64,
    pub max_students: Option<i32>,
}

pub struct CreateClassUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> CreateClassUseCase<C> {
    pub async fn execute(&self, input: CreateClassInput) -> Result<Class, SchoolServiceError> {
        let new_class = NewClass {
            class_name: input.class_name,
            teacher_name: input.teacher_name,
            year: input.year,
            students_fees: input.students_fees,
            max_students: input.max_students.unwrap_or(DEFAULT_MAX_STUDENTS),
        }
        .normalized()?;
        let class = self.classes.create(&new_class).await?;
        info!(
            class_name = %class.class_name,
            max_students = class.max_students,
            "class created"
        );
        Ok(class)
    }
}

// ── UpdateClass ──────────────────────────────────────────────────────────────

pub struct UpdateClassUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> UpdateClassUseCase<C> {
    pub async fn execute(
        &self,
        class_name: &str,
        mut changes: ClassChanges,
    ) -> Result<Class, SchoolServiceError> {
        let class_name = normalize_class_name(class_name)?;
        changes.teacher_name = changes.teacher_name.map(|t| t.trim().to_owned());
        changes.validate()?;
        let class = self.classes.update(&class_name, &changes).await?;
        info!(class_name = %class.class_name, "class updated");
        Ok(class)
    }
}

// ── DeleteClass ──────────────────────────────────────────────────────────────

pub struct DeleteClassUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> DeleteClassUseCase<C> {
    /// Only an empty class can be deleted.
    pub async fn execute(&self, class_name: &str) -> Result<String, SchoolServiceError> {
        let class_name = normalize_class_name(class_name)?;
        self.classes.delete(&class_name).await?;
        info!(class_name = %class_name, "class deleted");
        Ok(class_name)
    }
}

// ── AssignClass ──────────────────────────────────────────────────────────────

pub struct AssignClassUseCase<C: ClassRepository> {
    pub classes: C,
}

impl<C: ClassRepository> AssignClassUseCase<C> {
    /// Point a teacher at a class. Returns the normalized class name.
    pub async fn execute(
        &self,
        teacher_user_name: &str,
        class_name: &str,
    ) -> Result<String, SchoolServiceError> {
        let teacher_user_name = teacher_user_name.trim();
        if teacher_user_name.is_empty() {
            return Err(SchoolServiceError::invalid("teacherUserName is required"));
        }
        let class_name = normalize_class_name(class_name)?;
        self.classes
            .assign_teacher(teacher_user_name, &class_name)
            .await?;
        info!(
            teacher_user_name,
            class_name = %class_name,
            "teacher assigned to class"
        );
        Ok(class_name)
    }
}
