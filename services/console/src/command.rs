//! Command line parsing

use anyhow::{Result, anyhow, bail};
use common::UserStatus;

pub const USAGE: &str = "\
Usage: portal-console <command> [args]

Commands:
  login <email> <password>     sign in and keep the session
  logout                       forget the session
  whoami                       show the signed-in user
  publications                 list every publication
  active                       list publications currently shown
  pending                      list publications awaiting moderation
  approve <id>                 publish a pending publication
  reject <id>                  reject a pending publication
  like <id>                    like a publication
  users                        list admin accounts (super admin)
  user-status <id> <status>    set an account ACTIVE or INACTIVE (super admin)
  subscribers                  list newsletter subscribers
  subscribe <email>            subscribe an address to the newsletter
  unsubscribe <email>          remove an address from the newsletter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    Publications,
    Active,
    Pending,
    Approve(String),
    Reject(String),
    Like(String),
    Users,
    UserStatus { id: String, status: UserStatus },
    Subscribers,
    Subscribe(String),
    Unsubscribe(String),
}

fn arg(args: &[String], index: usize, name: &str) -> Result<String> {
    args.get(index)
        .cloned()
        .ok_or_else(|| anyhow!("missing <{}>\n\n{}", name, USAGE))
}

impl Command {
    /// Parse the arguments that follow the program name
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some(name) = args.first() else {
            bail!(USAGE);
        };

        let command = match name.as_str() {
            "login" => Command::Login {
                email: arg(args, 1, "email")?,
                password: arg(args, 2, "password")?,
            },
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "publications" => Command::Publications,
            "active" => Command::Active,
            "pending" => Command::Pending,
            "approve" => Command::Approve(arg(args, 1, "id")?),
            "reject" => Command::Reject(arg(args, 1, "id")?),
            "like" => Command::Like(arg(args, 1, "id")?),
            "users" => Command::Users,
            "user-status" => Command::UserStatus {
                id: arg(args, 1, "id")?,
                status: arg(args, 2, "status")?
                    .parse::<UserStatus>()
                    .map_err(|e: String| anyhow!(e))?,
            },
            "subscribers" => Command::Subscribers,
            "subscribe" => Command::Subscribe(arg(args, 1, "email")?),
            "unsubscribe" => Command::Unsubscribe(arg(args, 1, "email")?),
            other => bail!("unknown command {:?}\n\n{}", other, USAGE),
        };
        Ok(command)
    }
}
