mod common;

use lct_identity::{
    DirectoryUser, Guild, GuildDirectory, GuildGate, GuildMember, IdentityError, RejectReason,
    SessionIssuer, SignInDecision,
};
use std::sync::Mutex;

/// Scripted directory that records which steps ran.
#[derive(Debug, Default)]
struct FakeDirectory {
    guilds_status: Option<u16>,
    guilds: Vec<Guild>,
    member_fails: bool,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeDirectory {
    fn record(&self, step: &'static str) {
        self.calls.lock().unwrap().push(step);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl GuildDirectory for FakeDirectory {
    async fn exchange_code(&self, code: &str) -> Result<String, IdentityError> {
        self.record("token");
        Ok(format!("token-for-{code}"))
    }

    async fn current_user(&self, _token: &str) -> Result<DirectoryUser, IdentityError> {
        self.record("user");
        Ok(DirectoryUser {
            id: "42".to_owned(),
            username: "mira".to_owned(),
            global_name: None,
            avatar: Some("abc".to_owned()),
        })
    }

    async fn guilds(&self, _token: &str) -> Result<Vec<Guild>, IdentityError> {
        self.record("guilds");
        match self.guilds_status {
            Some(status) => Err(IdentityError::UpstreamStatus { status, context: None }),
            None => Ok(self.guilds.clone()),
        }
    }

    async fn member(&self, _token: &str, guild_id: &str) -> Result<GuildMember, IdentityError> {
        self.record("member");
        if self.member_fails {
            return Err(IdentityError::UpstreamStatus { status: 403, context: Some(guild_id.to_owned().into()) });
        }
        Ok(GuildMember { roles: vec!["officer".to_owned(), "player".to_owned()], nick: None })
    }
}

fn guild(id: &str, name: &str) -> Guild {
    Guild { id: id.to_owned(), name: name.to_owned() }
}

fn gate(directory: &FakeDirectory) -> GuildGate<&FakeDirectory> {
    GuildGate::new(directory, "777", SessionIssuer::new(&common::jwt_config()).unwrap()).unwrap()
}

#[tokio::test]
async fn member_of_guild_is_allowed_with_roles() {
    let directory = FakeDirectory {
        guilds: vec![guild("1", "Other"), guild("777", "Lyrian Chronicles")],
        ..FakeDirectory::default()
    };

    let SignInDecision::Allowed(session) = gate(&directory).sign_in("abc").await.unwrap() else {
        panic!("expected an allowed sign-in");
    };
    assert_eq!(session.user.id, "42");
    assert_eq!(session.user.name, "mira");
    assert_eq!(session.user.avatar.as_deref(), Some("abc"));
    assert_eq!(session.user.guild_name, "Lyrian Chronicles");
    assert_eq!(session.user.roles, ["officer", "player"]);
    assert_eq!(session.token_type, "Bearer");
    assert_eq!(directory.calls(), ["token", "user", "guilds", "member"]);
}

#[tokio::test]
async fn non_member_is_rejected_without_role_lookup() {
    let directory = FakeDirectory { guilds: vec![guild("1", "Other")], ..FakeDirectory::default() };

    let decision = gate(&directory).sign_in("abc").await.unwrap();
    assert_eq!(decision, SignInDecision::Rejected(RejectReason::NotAMember));
    assert_eq!(directory.calls(), ["token", "user", "guilds"]);
}

#[tokio::test]
async fn unreadable_guild_list_rejects_and_stops_the_pipeline() {
    let directory = FakeDirectory { guilds_status: Some(401), ..FakeDirectory::default() };

    let decision = gate(&directory).sign_in("abc").await.unwrap();
    assert_eq!(decision, SignInDecision::Rejected(RejectReason::GuildsUnavailable));
    assert_eq!(directory.calls(), ["token", "user", "guilds"]);
}

#[tokio::test]
async fn failed_role_lookup_degrades_to_no_roles() {
    let directory = FakeDirectory {
        guilds: vec![guild("777", "Lyrian Chronicles")],
        member_fails: true,
        ..FakeDirectory::default()
    };

    let SignInDecision::Allowed(session) = gate(&directory).sign_in("abc").await.unwrap() else {
        panic!("expected an allowed sign-in");
    };
    assert!(session.user.roles.is_empty());
}

#[tokio::test]
async fn blank_code_and_missing_guild_are_errors() {
    let directory = FakeDirectory::default();
    let err = gate(&directory).sign_in("  ").await.unwrap_err();
    assert!(matches!(err, IdentityError::Validation { .. }));
    assert!(directory.calls().is_empty());

    let issuer = SessionIssuer::new(&common::jwt_config()).unwrap();
    let err = GuildGate::new(&directory, "", issuer).unwrap_err();
    assert!(matches!(err, IdentityError::Config { .. }));
}
