use clap::Parser;
use listing_form::domain::model::{Field, FormPayload, ValidationReport};
use listing_form::utils::{logger, validation::Validate};
use listing_form::{
    CliConfig, FormConfig, FormContext, FormController, FormError, FormSession, HeadlessForm,
    HeadlessPage, HttpTransport, ListingDraft, SubmitResult,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting listing-form CLI");
    tracing::debug!("CLI config: {:?}", config);

    let mut form_config = match &config.config {
        Some(path) => load_or_exit(FormConfig::from_file(path)),
        None => FormConfig::default(),
    };
    if let Some(endpoint) = &config.endpoint {
        form_config.transport.endpoint = endpoint.clone();
    }

    // 驗證配置
    if let Err(e) = form_config.validate() {
        exit_with(&e, 1);
    }

    let draft = load_or_exit(ListingDraft::from_file(&config.draft));

    let page = HeadlessPage::new(form_config.default_center());
    let ctx = FormContext {
        view: HeadlessForm::default(),
        widgets: page.widgets(),
    };
    let mut controller = FormController::new(ctx, load_or_exit(form_config.form_settings()))?;
    if let Err(e) = draft.replay(&mut controller, &page) {
        exit_with(&e, 1);
    }

    if config.dry_run {
        let report = controller.validate()?;
        if report.is_valid() {
            println!("✅ Draft is valid");
            let payload = FormPayload::from(&controller.snapshot()?);
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }
        print_report_errors(&report);
        std::process::exit(2);
    }

    let transport = HttpTransport::new(
        form_config.transport.endpoint.clone(),
        form_config.transport.timeout_seconds,
    )?;
    tracing::info!("Submitting to {}", transport.endpoint());

    let mut session = FormSession::new(controller, transport);
    let result = session.submit().await?;
    if let Some(record) = session.into_controller().last_submission() {
        tracing::info!(
            "Submitted at {}, outcome {:?}",
            record.submitted_at.to_rfc3339(),
            record.outcome
        );
    }

    match result {
        SubmitResult::Accepted => {
            tracing::info!("✅ Listing submitted");
            println!("✅ Listing submitted");
        }
        SubmitResult::Invalid(report) => {
            print_report_errors(&report);
            std::process::exit(2);
        }
        SubmitResult::Rejected(e) => exit_with(&e, 3),
        SubmitResult::Ignored => {
            tracing::warn!("Submission ignored");
        }
    }

    Ok(())
}

fn print_report_errors(report: &ValidationReport) {
    for field in [Field::Title, Field::Price] {
        if let Some(message) = report.message_for(field) {
            eprintln!("❌ {:?}: {}", field, message);
        }
    }
}

fn load_or_exit<T>(result: Result<T, FormError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => exit_with(&e, 1),
    }
}

fn exit_with(e: &FormError, code: i32) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(code)
}
