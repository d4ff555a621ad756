use campus_domain::role::Role;
use campus_school::domain::repository::AccountRepository;
use campus_school::domain::types::{AccountDetails, ClassChanges};
use campus_school::error::SchoolServiceError;
use campus_school::usecase::class::{
    AssignClassUseCase, CreateClassInput, CreateClassUseCase, DeleteClassUseCase,
    UpdateClassUseCase,
};
use campus_school::usecase::report::{FinancialSummaryUseCase, GenderCountUseCase};

use crate::helpers::{
    InMemorySchool, create_class, signup_usecase, student_input, teacher_input,
};

fn class_input(class_name: &str) -> CreateClassInput {
    CreateClassInput {
        class_name: class_name.to_owned(),
        teacher_name: "Ms Rivera".to_owned(),
        year: 2026,
        students_fees: 1_500,
        max_students: None,
    }
}

// ── CreateClass ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_class_with_default_capacity() {
    let school = InMemorySchool::new();

    let class = CreateClassUseCase {
        classes: school.clone(),
    }
    .execute(class_input(" Ten-A "))
    .await
    .unwrap();

    assert_eq!(class.class_name, "ten-a");
    assert_eq!(class.max_students, 30);
    assert_eq!(class.current_students, 0);
}

#[tokio::test]
async fn should_reject_duplicate_class_name_case_insensitively() {
    let school = InMemorySchool::new();
    let usecase = CreateClassUseCase {
        classes: school.clone(),
    };
    usecase.execute(class_input("ten")).await.unwrap();

    let result = usecase.execute(class_input("TEN")).await;

    assert!(matches!(result, Err(SchoolServiceError::ClassAlreadyExists)));
}

// ── UpdateClass ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refuse_capacity_below_enrollment() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 3).await;
    let signup = signup_usecase(&school);
    for user_name in ["a@school.test", "b@school.test"] {
        signup
            .execute(Role::Student, student_input(user_name, "ten"))
            .await
            .unwrap();
    }
    let usecase = UpdateClassUseCase {
        classes: school.clone(),
    };

    let result = usecase
        .execute(
            "ten",
            ClassChanges {
                max_students: Some(1),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(SchoolServiceError::CapacityBelowEnrollment)
    ));

    let class = usecase
        .execute(
            "ten",
            ClassChanges {
                max_students: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(class.max_students, 2);
    assert!(class.is_full());
}

// ── DeleteClass ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refuse_to_delete_class_with_students() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 3).await;
    signup_usecase(&school)
        .execute(Role::Student, student_input("a@school.test", "ten"))
        .await
        .unwrap();

    let result = DeleteClassUseCase {
        classes: school.clone(),
    }
    .execute("ten")
    .await;

    assert!(matches!(result, Err(SchoolServiceError::ClassNotEmpty)));
    assert!(school.class("ten").is_some());
}

#[tokio::test]
async fn should_unassign_teacher_when_class_is_deleted() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 3).await;
    signup_usecase(&school)
        .execute(Role::Teacher, teacher_input("jdoe@school.test"))
        .await
        .unwrap();
    AssignClassUseCase {
        classes: school.clone(),
    }
    .execute("jdoe@school.test", "Ten")
    .await
    .unwrap();

    let deleted = DeleteClassUseCase {
        classes: school.clone(),
    }
    .execute("TEN")
    .await
    .unwrap();

    assert_eq!(deleted, "ten");
    let teacher = school
        .find(Role::Teacher, "jdoe@school.test")
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        teacher.details,
        AccountDetails::Teacher {
            assigned_class: None,
            ..
        }
    ));
}

// ── AssignClass ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_assign_teacher_to_class() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 3).await;
    signup_usecase(&school)
        .execute(Role::Teacher, teacher_input("jdoe@school.test"))
        .await
        .unwrap();

    let class_name = AssignClassUseCase {
        classes: school.clone(),
    }
    .execute(" jdoe@school.test ", "TEN")
    .await
    .unwrap();

    assert_eq!(class_name, "ten");
    let teacher = school
        .find(Role::Teacher, "jdoe@school.test")
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        teacher.details,
        AccountDetails::Teacher { assigned_class: Some(ref c), .. } if c == "ten"
    ));
}

#[tokio::test]
async fn should_fail_assignment_for_unknown_teacher_or_class() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 3).await;
    let usecase = AssignClassUseCase {
        classes: school.clone(),
    };

    let no_teacher = usecase.execute("ghost@school.test", "ten").await;
    assert!(matches!(no_teacher, Err(SchoolServiceError::AccountNotFound)));

    let no_class = usecase.execute("ghost@school.test", "eleven").await;
    assert!(matches!(no_class, Err(SchoolServiceError::ClassNotFound)));
}

// ── Reports ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_summarize_genders_and_finances() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 5).await;
    let signup = signup_usecase(&school);
    let mut boy = student_input("a@school.test", "ten");
    boy.gender = "Male".to_owned();
    boy.fees_paid = Some(1_000);
    signup.execute(Role::Student, boy).await.unwrap();
    signup
        .execute(Role::Student, student_input("b@school.test", "ten"))
        .await
        .unwrap();
    signup
        .execute(Role::Teacher, teacher_input("jdoe@school.test"))
        .await
        .unwrap();

    let genders = GenderCountUseCase {
        reports: school.clone(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!((genders.male, genders.female, genders.other), (1, 1, 0));

    let summary = FinancialSummaryUseCase {
        reports: school.clone(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(summary.total_fees_paid, 2_500);
    assert_eq!(summary.total_salaries, 42_000);
    assert_eq!(summary.student_count, 2);
    assert_eq!(summary.teacher_count, 1);
}
