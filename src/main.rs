use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match care_records::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("care-records: {e}");
            ExitCode::FAILURE
        }
    }
}
