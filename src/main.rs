use querydesk::config::DeskConfig;
use querydesk::dashboard::{FacultyDashboard, FacultyTab, StudentDashboard};
use querydesk::state::review::Facet;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Config errors are non-fatal: fall back to defaults.
    let config = match DeskConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid desk config, using defaults");
            DeskConfig::default()
        }
    };

    run_student(&config).await;
    run_faculty(&config);
}

async fn run_student(config: &DeskConfig) {
    let mut student = StudentDashboard::new(config);

    for question in ["When is the submission deadline?", "What is the exam schedule?", "   "] {
        match student.chat.submit(question) {
            Ok(topic) => {
                tracing::info!(?topic, question, "student asked");
                student.chat.settle().await;
            }
            Err(e) => tracing::info!(notice = ?e.notice(), "submission rejected"),
        }
    }

    let transcript = student.chat.snapshot();
    for message in &transcript.messages {
        match serde_json::to_string(message) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(error = %e, "message encode failed"),
        }
    }
}

fn run_faculty(config: &DeskConfig) {
    let mut faculty = FacultyDashboard::new(config);
    tracing::info!(summary = %faculty.pending_summary(), "faculty dashboard opened");

    let high: Vec<_> = faculty
        .review
        .filter(Facet::Priority(querydesk::state::Priority::High))
        .iter()
        .map(|q| q.id)
        .collect();
    for id in high {
        match faculty.review.approve(id) {
            Ok(notice) => tracing::info!(title = %notice.title, "review"),
            Err(e) => tracing::warn!(notice = ?e.notice(), "review rejected"),
        }
    }

    faculty.select_tab(FacultyTab::Live);
    match faculty.flag_live_query() {
        Ok(notice) => tracing::info!(title = %notice.title, "live"),
        Err(e) => tracing::warn!(notice = ?e.notice(), "flag rejected"),
    }
    match faculty.respond_live("Please stop by the registrar's office.") {
        Ok(notice) => tracing::info!(title = %notice.title, "live"),
        Err(e) => tracing::warn!(notice = ?e.notice(), "response rejected"),
    }
    faculty.select_tab(FacultyTab::Review);

    tracing::info!(summary = %faculty.pending_summary(), "faculty dashboard closed");
}
