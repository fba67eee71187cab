mod common;

use lct_domain::config::DiscordConfig;
use lct_identity::{DiscordDirectory, GuildDirectory, GuildGate, IdentityError, RejectReason, SignInDecision};

fn discord_config(api_base: String) -> DiscordConfig {
    DiscordConfig {
        client_id: "client".to_owned(),
        client_secret: "secret".to_owned(),
        guild_id: common::GUILD_ID.to_owned(),
        api_base,
        ..DiscordConfig::default()
    }
}

#[tokio::test]
async fn discord_directory_speaks_the_rest_api() {
    let addr = common::discord_stub().await;
    let config = discord_config(format!("http://{addr}"));
    let directory = DiscordDirectory::new(DiscordDirectory::client().unwrap(), &config).unwrap();

    let token = directory.exchange_code("good").await.unwrap();
    assert_eq!(token, "tok-good");

    assert_eq!(directory.current_user(&token).await.unwrap().global_name.as_deref(), Some("Mira"));
    assert_eq!(directory.guilds(&token).await.unwrap().len(), 2);
    assert_eq!(directory.member(&token, common::GUILD_ID).await.unwrap().roles, ["officer"]);

    let err = directory.exchange_code("stolen").await.unwrap_err();
    assert!(matches!(err, IdentityError::UpstreamStatus { status: 400, .. }));
}

#[tokio::test]
async fn discord_gate_end_to_end() {
    let addr = common::discord_stub().await;
    let config = discord_config(format!("http://{addr}/"));
    let gate =
        GuildGate::discord(DiscordDirectory::client().unwrap(), &config, &common::jwt_config()).unwrap();

    let SignInDecision::Allowed(session) = gate.sign_in("good").await.unwrap() else {
        panic!("member should be allowed");
    };
    assert_eq!(session.user.name, "Mira");
    assert_eq!(session.user.roles, ["officer"]);

    assert_eq!(
        gate.sign_in("outsider").await.unwrap(),
        SignInDecision::Rejected(RejectReason::NotAMember)
    );
}
