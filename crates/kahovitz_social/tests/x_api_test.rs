use kahovitz_interface::StatusPoster;
use kahovitz_social::XClient;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_verify_credentials() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let client = XClient::from_env()?;
    let account = client.verify_credentials().await?;

    assert!(!account.username.is_empty());
    println!("Authenticated as @{}", account.username);

    Ok(())
}
