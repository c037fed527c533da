use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{info, warn};

use crate::{
    config::ServiceConfig,
    entity::{referral, user},
    error::{is_unique_violation, ServiceError},
    repositories::{self, user::NewUser},
    services::ledger,
    utils::{password, referral_code},
};

/// Upper bound on fresh-code draws for one registration. With 36^8 codes a
/// run of collisions this long points at a broken generator, not bad luck.
const MAX_REFERRAL_CODE_ATTEMPTS: usize = 32;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub user: user::Model,
    pub referral: Option<referral::Model>,
}

impl Registration {
    fn validate(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::Validation("Name is required".to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ServiceError::Validation("Email is required".to_string()));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(ServiceError::Validation(
                    "Please provide a valid email".to_string(),
                ))
            }
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Creates an account and pays the signup referral bonuses when a valid
/// referral code was supplied. `next_code` supplies candidate referral codes
/// for the new account; it is called again whenever a candidate is taken.
pub async fn register(
    db: &DatabaseConnection,
    config: &ServiceConfig,
    registration: Registration,
    mut next_code: impl FnMut() -> String,
) -> Result<RegisteredUser, ServiceError> {
    registration.validate()?;
    let email = normalize_email(&registration.email);
    let password_hash =
        password::hash(&registration.password, config.app.password_hash_cost).await?;

    let txn = db.begin().await?;

    if repositories::user::exist_by_email(&txn, &email).await? {
        return Err(ServiceError::DuplicateEmail);
    }

    let referrer = match registration
        .referral_code
        .as_deref()
        .map(referral_code::normalize)
        .filter(|code| !code.is_empty())
    {
        Some(code) => {
            let found = repositories::user::find_by_referral_code(&txn, &code).await?;
            if found.is_none() {
                info!("Ignoring unknown referral code {}", code);
            }
            found
        }
        None => None,
    };

    let rewards = &config.rewards;
    let new_user = insert_with_unique_code(
        &txn,
        &email,
        registration.name.trim(),
        &password_hash,
        referrer.as_ref().map(|r| r.id),
        rewards.initial_grant,
        &mut next_code,
    )
    .await?;

    let referral = match &referrer {
        Some(referrer) => {
            ledger::credit(&txn, referrer.id, rewards.referrer_signup_bonus).await?;
            ledger::credit(&txn, new_user.id, rewards.friend_signup_bonus).await?;
            let referral =
                repositories::referral::save_signup_awarded(&txn, referrer.id, new_user.id)
                    .await?;
            info!(
                "Paid signup referral bonus: referrer {} +{}, new user {} +{}",
                referrer.id, rewards.referrer_signup_bonus, new_user.id, rewards.friend_signup_bonus
            );
            Some(referral)
        }
        None => None,
    };

    // Re-read so the returned balance includes the bonus.
    let user = repositories::user::find_by_id(&txn, new_user.id)
        .await?
        .ok_or(ServiceError::UserNotFound)?;

    txn.commit().await?;

    Ok(RegisteredUser { user, referral })
}

/// Inserts the user under the first candidate code nobody holds yet. Each
/// attempt runs inside a savepoint so a unique violation on the code only
/// discards that attempt, not the surrounding transaction.
async fn insert_with_unique_code(
    txn: &DatabaseTransaction,
    email: &str,
    name: &str,
    password_hash: &str,
    referred_by: Option<uuid::Uuid>,
    credits: i64,
    next_code: &mut impl FnMut() -> String,
) -> Result<user::Model, ServiceError> {
    for _ in 0..MAX_REFERRAL_CODE_ATTEMPTS {
        let code = next_code();
        if repositories::user::exist_by_referral_code(txn, &code).await? {
            warn!("Referral code collision on {}, drawing another", code);
            continue;
        }

        let savepoint = txn.begin().await?;
        let inserted = repositories::user::save(
            &savepoint,
            NewUser {
                email,
                name,
                password_hash,
                referral_code: &code,
                referred_by,
                credits,
            },
        )
        .await;

        match inserted {
            Ok(user) => {
                savepoint.commit().await?;
                return Ok(user);
            }
            Err(e) if is_unique_violation(&e) => {
                savepoint.rollback().await?;
                // Either a concurrent signup took the email or the code.
                if repositories::user::exist_by_email(txn, email).await? {
                    return Err(ServiceError::DuplicateEmail);
                }
                warn!("Referral code {} was claimed concurrently, drawing another", code);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ServiceError::Internal(
        "Could not allocate a unique referral code".to_string(),
    ))
}
