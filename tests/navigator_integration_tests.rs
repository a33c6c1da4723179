use remedy_guide::core::catalog::Catalog;
use remedy_guide::core::category::CategoryKey;
use remedy_guide::core::navigator::{
    BackNavigation, NavigationError, Navigator, NavigatorState, RootSequencing,
};
use rstest::rstest;

fn catalog() -> Catalog {
    Catalog::bundled().unwrap()
}

#[rstest]
#[case(CategoryKey::CommonCold)]
#[case(CategoryKey::Cough)]
#[case(CategoryKey::Allergies)]
#[case(CategoryKey::Fever)]
#[case(CategoryKey::Digestive)]
#[case(CategoryKey::FirstAid)]
fn test_start_lands_on_first_root(#[case] key: CategoryKey) {
    let catalog = catalog();
    let mut nav = Navigator::default();
    let roots = catalog.lookup(key);
    assert_eq!(nav.start(roots), &NavigatorState::AtQuestion(roots[0].clone()));
}

/// Always taking the first answer must end at a remedy within three steps.
#[rstest]
fn test_first_answers_reach_a_remedy(
    #[values(
        CategoryKey::CommonCold,
        CategoryKey::Cough,
        CategoryKey::Allergies,
        CategoryKey::Fever,
        CategoryKey::Digestive,
        CategoryKey::FirstAid
    )]
    key: CategoryKey,
) {
    let catalog = catalog();
    let mut nav = Navigator::default();
    nav.start(catalog.lookup(key));
    for _ in 0..3 {
        if nav.state().remedy().is_some() {
            break;
        }
        nav.select_index(0).unwrap();
    }
    assert!(nav.state().remedy().is_some(), "{} never reached a remedy", key);
}

#[test]
fn test_three_step_cough_path() {
    let catalog = catalog();
    let mut nav = Navigator::default();
    nav.start(catalog.lookup(CategoryKey::Cough));
    nav.select_index(2).unwrap(); // dry cough with another trigger
    nav.select_index(2).unwrap(); // barking or croupy
    assert_eq!(nav.depth(), 2);
    nav.select_index(0).unwrap();
    assert!(nav.state().remedy().is_some());
    assert_eq!(nav.trail().len(), 3);
}

#[test]
fn test_dead_end_keeps_question_by_default() {
    let catalog = catalog();
    let mut nav = Navigator::default();
    let roots = catalog.lookup(CategoryKey::Fever);
    nav.start(roots);
    let state = nav.select_index(3).unwrap().clone(); // "Not sure"
    assert_eq!(state, NavigatorState::AtQuestion(roots[0].clone()));
    assert_eq!(nav.depth(), 0);
}

#[test]
fn test_sequential_dead_end_moves_to_second_root() {
    let catalog = catalog();
    let mut nav = Navigator::new(BackNavigation::History, RootSequencing::Sequential);
    let roots = catalog.lookup(CategoryKey::CommonCold);
    nav.start(roots);
    nav.select_index(3).unwrap(); // "None of these describe it"
    assert_eq!(nav.state(), &NavigatorState::AtQuestion(roots[1].clone()));

    nav.select_index(0).unwrap();
    assert!(nav.state().remedy().is_some());
    assert_eq!(nav.back(), &NavigatorState::AtQuestion(roots[1].clone()));
    assert_eq!(nav.back(), &NavigatorState::AtQuestion(roots[0].clone()));
}

#[test]
fn test_restart_back_returns_to_start_prompt() {
    let catalog = catalog();
    let mut nav = Navigator::default();
    nav.start(catalog.lookup(CategoryKey::FirstAid));
    nav.select_index(3).unwrap();
    nav.select_index(0).unwrap();
    assert_eq!(nav.back(), &NavigatorState::NotStarted);
    assert!(nav.trail().is_empty());
}

#[test]
fn test_select_after_remedy_is_rejected() {
    let catalog = catalog();
    let mut nav = Navigator::default();
    nav.start(catalog.lookup(CategoryKey::Cough));
    nav.select_index(0).unwrap();
    let before = nav.state().clone();

    let err = nav.select_index(0).unwrap_err();
    assert_eq!(
        err,
        NavigationError::InvalidStateTransition { state: "AtRemedy" }
    );
    assert_eq!(nav.state(), &before);
}

#[test]
fn test_reset_is_idempotent() {
    let catalog = catalog();
    let mut nav = Navigator::default();
    nav.start(catalog.lookup(CategoryKey::Digestive));
    nav.select_index(0).unwrap();
    assert_eq!(nav.reset(), &NavigatorState::NotStarted);
    assert_eq!(nav.reset(), &NavigatorState::NotStarted);
}

#[test]
fn test_start_with_no_roots_stays_not_started() {
    let mut nav = Navigator::default();
    assert_eq!(nav.start(&[]), &NavigatorState::NotStarted);
    assert!(nav.select_index(0).is_err());
}
