//! End-to-end tests: a session is edited through its public commands and
//! the command handler, then ranked.

use std::sync::Arc;

use fuzzy_ahp::adapters::InMemoryEventLog;
use fuzzy_ahp::application::{SessionCommand, SessionCommandHandler, SharedSession};
use fuzzy_ahp::domain::foundation::ErrorCode;
use fuzzy_ahp::domain::fuzzy::Tfn;
use fuzzy_ahp::domain::matrix::IndexMapping;
use fuzzy_ahp::domain::scale::{LinguisticTermSet, TermDraft, TermField, TermIssue};
use fuzzy_ahp::domain::session::Session;

const TOL: f64 = 2e-3;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Cost beats Quality weakly; A wins on cost, B on quality.
fn car_session() -> Session {
    Session::new(
        names(&["Cost", "Quality"]),
        names(&["A", "B"]),
        LinguisticTermSet::saaty(),
    )
    .unwrap()
    .set_criteria_comparison(0, 1, 3.0)
    .unwrap()
    .set_alternative_comparison(0, 0, 1, 3.0)
    .unwrap()
    .set_alternative_comparison(1, 0, 1, 1.0 / 3.0)
    .unwrap()
}

#[test]
fn worked_scenario_ranks_through_session() {
    let result = car_session().compute().unwrap();

    let criteria = &result.criteria_analysis.weights.normalized;
    assert!((criteria[0] - 0.7425).abs() < TOL);
    assert!((criteria[1] - 0.2575).abs() < TOL);

    assert!((result.global_scores[0] - 0.6176).abs() < TOL);
    assert!((result.global_scores[1] - 0.3824).abs() < TOL);
    assert!((result.global_scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);

    assert_eq!(result.best().unwrap().name, "A");
    assert_eq!(result.ranking[0].rank, 1);
    assert_eq!(result.ranking[1].rank, 2);
    assert_eq!(result.inconsistent_matrices(), 0);
    assert!(!result.has_degenerate_weights());
}

#[test]
fn lower_triangle_entry_is_stored_where_entered() {
    let upper = Session::default().set_criteria_comparison(0, 1, 3.0).unwrap();
    let lower = Session::default().set_criteria_comparison(1, 0, 3.0).unwrap();

    let entered = lower.criteria_matrix().cell(1, 0).unwrap();
    assert_eq!(entered.tri.components(), [2.0, 3.0, 4.0]);
    assert!(!entered.is_inverse);
    assert_eq!(entered.intensity, 3.0);
    assert!(lower.criteria_matrix().cell(0, 1).unwrap().is_inverse);

    let up = upper.compute().unwrap();
    let down = lower.compute().unwrap();
    let up = &up.criteria_analysis.weights.normalized;
    let down = &down.criteria_analysis.weights.normalized;
    assert!((up[0] - down[1]).abs() < 1e-12);
}

#[test]
fn reciprocal_cell_mirrors_entry() {
    let session = Session::default().set_criteria_comparison(0, 1, 5.0).unwrap();
    let matrix = session.criteria_matrix();

    let upper = matrix.cell(0, 1).unwrap();
    let lower = matrix.cell(1, 0).unwrap();
    assert_eq!(upper.tri.components(), [4.0, 5.0, 6.0]);
    assert!(!upper.is_inverse);
    assert!(lower.is_inverse);
    assert!(lower.tri.approx_eq(&Tfn::new(1.0 / 6.0, 0.2, 0.25).unwrap(), 1e-12));
    assert_eq!(matrix.tri(0, 0), Some(Tfn::ONE));
}

#[test]
fn invalid_comparisons_are_rejected() {
    let session = Session::default();
    assert_eq!(
        session.set_criteria_comparison(0, 0, 3.0).unwrap_err().code,
        ErrorCode::SelfComparison
    );
    assert_eq!(
        session.set_criteria_comparison(0, 2, 3.0).unwrap_err().code,
        ErrorCode::IndexOutOfRange
    );
    assert_eq!(
        session.set_criteria_comparison(0, 1, -1.0).unwrap_err().code,
        ErrorCode::InvalidIntensity
    );
}

#[test]
fn removing_a_criterion_keeps_other_judgments() {
    let session = car_session()
        .insert_criterion(1, "Comfort")
        .unwrap()
        .set_criteria_comparison(0, 1, 5.0)
        .unwrap();
    assert_eq!(session.criteria(), &names(&["Cost", "Comfort", "Quality"])[..]);
    assert_eq!(
        session.criteria_matrix().tri(0, 2).unwrap().components(),
        [2.0, 3.0, 4.0]
    );

    let trimmed = session.remove_criterion(1).unwrap();
    assert_eq!(trimmed.criteria(), &names(&["Cost", "Quality"])[..]);
    assert_eq!(trimmed.alternative_matrices().len(), 2);

    let before = car_session().compute().unwrap();
    let after = trimmed.compute().unwrap();
    for (a, b) in before.global_scores.iter().zip(&after.global_scores) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn explicit_mapping_reorders_alternatives() {
    let session = car_session();
    let swap = IndexMapping::new(vec![Some(1), Some(0)], 2).unwrap();
    let swapped = session
        .resize_alternatives(&swap, names(&["B", "A"]))
        .unwrap();

    let original = session.compute().unwrap();
    let reordered = swapped.compute().unwrap();
    assert!((original.global_scores[0] - reordered.global_scores[1]).abs() < 1e-12);
    assert_eq!(reordered.best().unwrap().name, "A");
    assert_eq!(reordered.best().unwrap().index, 1);
}

#[test]
fn term_table_edit_is_validated_and_staged() {
    let session = car_session();

    let rejected = session
        .update_term_set(vec![
            TermDraft::new(1, "Equal", "EQ", 1, (1.0, 1.0, 1.0)),
            TermDraft::new(2, "Strong", "EQ", 3, (4.0, 3.0, 5.0)),
        ])
        .unwrap_err();
    let report = rejected.report();
    assert!(report.has(0, TermField::ShortName, TermIssue::DuplicateShortName));
    assert!(report.has(1, TermField::ShortName, TermIssue::DuplicateShortName));
    assert!(report.has(1, TermField::Lower, TermIssue::LowerAboveModal));

    let mut drafts = session.terms().to_drafts();
    for draft in drafts.iter_mut().filter(|d| d.value == 3) {
        draft.l = 1.0;
        draft.u = 5.0;
    }
    let edited = session.update_term_set(drafts).unwrap();
    assert_eq!(edited.criteria_matrix(), session.criteria_matrix());

    let refreshed = edited.refresh_cells();
    assert_eq!(
        refreshed.criteria_matrix().tri(0, 1).unwrap().components(),
        [1.0, 3.0, 5.0]
    );
    assert!(refreshed.criteria_matrix().is_reciprocal(1e-12));
}

#[test]
fn handler_publishes_one_event_per_command() {
    let log = Arc::new(InMemoryEventLog::new());
    let handler = SessionCommandHandler::new(log.clone());
    let shared = SharedSession::new(car_session());

    shared
        .execute(&handler, SessionCommand::AddAlternative { name: "C".to_string() })
        .unwrap();
    let outcome = shared
        .execute(
            &handler,
            SessionCommand::SetAlternativeComparison {
                criterion: 1,
                i: 2,
                j: 1,
                intensity: 9.0,
            },
        )
        .unwrap();

    assert_eq!(log.event_count(), 2);
    let event = log.latest().unwrap();
    assert_eq!(event.event_type(), "analysis.ranking_computed");
    assert_eq!(&event.session_id, outcome.session.id());
    assert_eq!(event.ranking.len(), 3);
    assert_eq!(shared.snapshot().unwrap().alternatives().len(), 3);
}

#[test]
fn result_serializes_fuzzy_numbers_as_triples() {
    let result = car_session().compute().unwrap();
    let json = serde_json::to_value(&result).unwrap();

    let first = &json["criteria_analysis"]["weights"]["geometric_means"][0];
    assert!(first.is_array());
    assert_eq!(first.as_array().unwrap().len(), 3);
    assert_eq!(json["ranking"][0]["name"], "A");
}
