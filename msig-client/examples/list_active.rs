use msig_client::{ActiveProposalsOptions, ClientConfig, PaginationInfo, ProposalsClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    // Reads MSIG_URL, MSIG_TIMEOUT and the optional MSIG_MAX_* ceilings
    let config = ClientConfig::new()?;
    let client = ProposalsClient::from_config(&config)?;

    let limit = client.max_proposal_limit().await;
    println!("Service allows up to {limit} proposals per page");

    let mut offset = 0;
    loop {
        let page = client
            .get_active_proposals(
                ActiveProposalsOptions::default()
                    .with_limit(limit)
                    .with_offset(offset),
            )
            .await?;

        for proposal in &page.proposals {
            println!(
                "{}/{} expires {} ({} actions)",
                proposal.proposer,
                proposal.proposal_name,
                proposal.expiration,
                proposal.action_count
            );
        }

        let info = PaginationInfo::for_page(&page, offset, u64::from(limit));
        match info.next_offset {
            Some(next) => offset = next,
            None => break,
        }
    }

    Ok(())
}
