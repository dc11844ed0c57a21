use std::fs;
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use mortgage_advisor::workflows::mortgage::{
    ApplicantProfile, AssessmentRequest, BankOutcome, CatalogError, ConstraintCatalog,
    CsvCatalogStore, CsvHistoryLog, EvaluationConfig, HistoryRecorder, IneligibilityReason,
    MortgageAdvisorService,
};

const BANK_CSV: &str = "\
Bank Name, Base Interest Rate, Max Loan to Income, Min Credit Score, Down Payment (%)
Fjord Bank, 6.1, 4.0, 720, 10
Harbour Credit, 5.5, 5.0, 650, 10
";

fn applicant() -> ApplicantProfile {
    ApplicantProfile {
        loan_amount: 400_000.0,
        annual_income: 90_000.0,
        capital: 50_000.0,
        credit_score: 680,
    }
}

#[test]
fn csv_catalog_drives_assessment_and_history() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalog_path = dir.path().join("constraints_data.csv");
    let history_path = dir.path().join("user_information.csv");
    fs::write(&catalog_path, BANK_CSV).expect("catalog written");

    let catalog = CsvCatalogStore::new(&catalog_path)
        .load()
        .expect("catalog loads");
    assert_eq!(catalog.len(), 2);
    assert_abs_diff_eq!(
        catalog.get("Harbour Credit").expect("bank present").down_payment_fraction,
        0.10,
        epsilon = 1e-12
    );

    let history = Arc::new(CsvHistoryLog::new(&history_path));
    let service =
        MortgageAdvisorService::new(catalog, Arc::clone(&history), EvaluationConfig::default());

    let report = service
        .assess(AssessmentRequest::from(applicant()))
        .expect("assessment succeeds");
    assert!(report.qualifies_anywhere());
    assert_eq!(report.eligible_count, 1);
    assert_eq!(report.ineligible_count, 1);

    let declined = report.ineligible().next().expect("one bank declines");
    assert_eq!(declined.bank.name, "Fjord Bank");
    assert!(declined
        .reasons()
        .iter()
        .any(|reason| matches!(reason, IneligibilityReason::CreditScoreBelowMinimum { .. })));

    let approved = report.eligible().next().expect("one bank approves");
    let payments: Vec<f64> = approved
        .loan_options()
        .iter()
        .map(|option| option.monthly_payment)
        .collect();
    assert_abs_diff_eq!(payments[0], 3268.33, epsilon = 0.01);
    assert_abs_diff_eq!(payments[1], 2456.35, epsilon = 0.01);
    assert_abs_diff_eq!(payments[2], 2271.16, epsilon = 0.01);

    let invalid = ApplicantProfile {
        annual_income: 0.0,
        ..applicant()
    };
    assert!(service.assess(invalid.into()).is_err());

    let recorded = history.recent(10).expect("history readable");
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].profile(), applicant());

    let raw = fs::read_to_string(&history_path).expect("history file exists");
    assert!(raw.starts_with("Recorded At,Loan Amount,Annual Income,Capital,Credit Score"));
}

#[test]
fn missing_catalog_is_seeded_with_reference_banks() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = CsvCatalogStore::new(dir.path().join("constraints_data.csv"));

    let catalog = store
        .load_or_seed(&ConstraintCatalog::reference())
        .expect("catalog seeds");
    let names: Vec<&str> = catalog.iter().map(|bank| bank.name.as_str()).collect();
    assert_eq!(names, vec!["Nordea", "DNB", "SPAREBANK 1"]);

    let reloaded = store.load().expect("seeded catalog reloads");
    assert_eq!(reloaded, catalog);
}

#[test]
fn corrupt_catalog_is_reported_and_left_untouched() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("constraints_data.csv");
    let corrupt = "Bank Name,Base Interest Rate,Max Loan to Income,Min Credit Score,Down Payment (%)\nBroken Bank,abc,4.0,700,10\n";
    fs::write(&path, corrupt).expect("catalog written");

    let store = CsvCatalogStore::new(&path);
    let error = store
        .load_or_seed(&ConstraintCatalog::reference())
        .expect_err("corrupt store is surfaced");
    assert!(matches!(error, CatalogError::Csv(_)));
    assert_eq!(fs::read_to_string(&path).expect("file readable"), corrupt);
}

#[test]
fn alternative_offer_flows_through_the_service() {
    let dir = tempfile::tempdir().expect("temp dir");
    let history = Arc::new(CsvHistoryLog::new(dir.path().join("user_information.csv")));
    let service = MortgageAdvisorService::new(
        ConstraintCatalog::reference(),
        history,
        EvaluationConfig::default().with_alternatives(true),
    );

    let report = service
        .preview(AssessmentRequest::from(ApplicantProfile {
            loan_amount: 500_000.0,
            annual_income: 100_000.0,
            capital: 60_000.0,
            credit_score: 760,
        }))
        .expect("preview succeeds");

    // Nordea caps at 400,000 with a 10% down payment the applicant can cover.
    let nordea = &report.decisions[0];
    match &nordea.outcome {
        BankOutcome::AlternativeOffer {
            offered_amount,
            offered_down_payment,
            ..
        } => {
            assert_eq!(*offered_amount, 400_000.0);
            assert_eq!(*offered_down_payment, 40_000.0);
        }
        other => panic!("expected alternative offer, got {other:?}"),
    }
    assert!(!dir.path().join("user_information.csv").exists());
}
