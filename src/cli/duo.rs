use crate::{cli, error, success, types::TermWindow};

pub async fn duo(user: Option<String>, peer: String, term: TermWindow) {
    let (store, assembler) = cli::build_assembler();
    let owner = cli::resolve_owner(user, &store).await;

    let pb = cli::spinner("Generating your Duo report...");
    let result = assembler.duo(&owner, &peer, term.wire_value()).await;
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            success!(
                "Duo report for {} and {} ({}) saved.",
                report.owner,
                peer,
                term
            );
            cli::wrapped::print_report(&report);
        }
        Err(e) => {
            error!("{}", cli::report_error_message(&e));
        }
    }
}
