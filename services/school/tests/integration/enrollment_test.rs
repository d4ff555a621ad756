use campus_domain::role::Role;
use campus_school::domain::repository::AccountRepository;
use campus_school::domain::types::AccountDetails;
use campus_school::error::SchoolServiceError;
use campus_school::usecase::auth::DeleteAccountUseCase;
use campus_school::usecase::report::ClassAnalyticsUseCase;

use crate::helpers::{InMemorySchool, create_class, signup_usecase, student_input};

#[tokio::test]
async fn should_enroll_until_class_is_full() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 2).await;
    let signup = signup_usecase(&school);

    signup
        .execute(Role::Student, student_input("a@school.test", "ten"))
        .await
        .unwrap();
    signup
        .execute(Role::Student, student_input("b@school.test", "ten"))
        .await
        .unwrap();
    let third = signup
        .execute(Role::Student, student_input("c@school.test", "ten"))
        .await;

    assert!(
        matches!(third, Err(SchoolServiceError::ClassFull)),
        "expected ClassFull, got {third:?}"
    );
    let class = school.class("ten").unwrap();
    assert_eq!(class.current_students, 2);
    assert_eq!(class.available_slots(), 0);
    assert_eq!(school.count(Role::Student), 2);
}

#[tokio::test]
async fn should_normalize_class_name_on_enrollment() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 2).await;

    signup_usecase(&school)
        .execute(Role::Student, student_input("a@school.test", "  TEN "))
        .await
        .unwrap();

    assert_eq!(school.class("ten").unwrap().current_students, 1);
}

#[tokio::test]
async fn should_reject_enrollment_into_unknown_class() {
    let school = InMemorySchool::new();

    let result = signup_usecase(&school)
        .execute(Role::Student, student_input("a@school.test", "nine"))
        .await;

    assert!(matches!(result, Err(SchoolServiceError::ClassNotFound)));
    assert_eq!(school.count(Role::Student), 0);
}

#[tokio::test]
async fn should_not_consume_seat_on_duplicate_student() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 3).await;
    let signup = signup_usecase(&school);
    signup
        .execute(Role::Student, student_input("a@school.test", "ten"))
        .await
        .unwrap();

    let result = signup
        .execute(Role::Student, student_input("a@school.test", "ten"))
        .await;

    assert!(matches!(result, Err(SchoolServiceError::AccountAlreadyExists)));
    assert_eq!(school.class("ten").unwrap().current_students, 1);
}

#[tokio::test]
async fn should_admit_exactly_one_of_two_racing_students_for_last_seat() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 1).await;
    let signup = signup_usecase(&school);

    let (first, second) = tokio::join!(
        signup.execute(Role::Student, student_input("a@school.test", "ten")),
        signup.execute(Role::Student, student_input("b@school.test", "ten")),
    );

    let admitted = [first.is_ok(), second.is_ok()]
        .into_iter()
        .filter(|ok| *ok)
        .count();
    assert_eq!(admitted, 1);
    let rejected = if first.is_err() { first } else { second };
    assert!(matches!(rejected, Err(SchoolServiceError::ClassFull)));
    assert_eq!(school.class("ten").unwrap().current_students, 1);
}

#[tokio::test]
async fn should_free_seat_when_student_is_deleted() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 1).await;
    let signup = signup_usecase(&school);
    signup
        .execute(Role::Student, student_input("a@school.test", "ten"))
        .await
        .unwrap();

    DeleteAccountUseCase {
        accounts: school.clone(),
    }
    .execute(Role::Student, "a@school.test")
    .await
    .unwrap();
    assert_eq!(school.class("ten").unwrap().current_students, 0);

    signup
        .execute(Role::Student, student_input("b@school.test", "ten"))
        .await
        .unwrap();
    assert_eq!(school.class("ten").unwrap().current_students, 1);
}

#[tokio::test]
async fn should_list_roster_in_enrollment_order() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 5).await;
    let signup = signup_usecase(&school);
    for user_name in ["zed@school.test", "amy@school.test", "kim@school.test"] {
        signup
            .execute(Role::Student, student_input(user_name, "ten"))
            .await
            .unwrap();
    }

    let rosters = ClassAnalyticsUseCase {
        reports: school.clone(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(rosters.len(), 1);
    assert_eq!(
        rosters[0].students,
        vec!["zed@school.test", "amy@school.test", "kim@school.test"]
    );
    assert_eq!(rosters[0].class.current_students, 3);
}

#[tokio::test]
async fn should_record_class_on_student_account() {
    let school = InMemorySchool::new();
    create_class(&school, "ten", 5).await;
    signup_usecase(&school)
        .execute(Role::Student, student_input("a@school.test", "ten"))
        .await
        .unwrap();

    let rosters = ClassAnalyticsUseCase {
        reports: school.clone(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(rosters[0].students, vec!["a@school.test"]);

    let account = school
        .find(Role::Student, "a@school.test")
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        account.details,
        AccountDetails::Student { ref class_name, fees_paid: 1_500, .. } if class_name == "ten"
    ));
}
