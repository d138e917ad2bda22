use crate::domain::errors::DomainError;

const CNT_ARTICLE_TITLE_PRESENT: &str = "articles_title_present_chk";
const CNT_ARTICLE_ROT_REPORTER: &str = "articles_rot_reporter_chk";
const CNT_TAG_LABEL: &str = "tags_label_key";
const CNT_ENDORSEMENT_PAIR: &str = "article_endorsements_article_user_key";
const CNT_SUBSCRIPTION_PAIR: &str = "article_subscriptions_article_user_key";
const CNT_ENDORSEMENT_ARTICLE: &str = "article_endorsements_article_id_fkey";
const CNT_SUBSCRIPTION_ARTICLE: &str = "article_subscriptions_article_id_fkey";
const CNT_ARTICLE_TAG_ARTICLE: &str = "articles_tags_article_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ENDORSEMENT_PAIR => {
                        DomainError::DuplicateRelationship("endorsement already exists".into())
                    }
                    CNT_SUBSCRIPTION_PAIR => {
                        DomainError::DuplicateRelationship("subscription already exists".into())
                    }
                    CNT_TAG_LABEL => DomainError::Conflict("tag label already exists".into()),
                    CNT_ENDORSEMENT_ARTICLE | CNT_SUBSCRIPTION_ARTICLE | CNT_ARTICLE_TAG_ARTICLE => {
                        DomainError::NotFound("article not found".into())
                    }
                    CNT_ARTICLE_TITLE_PRESENT => {
                        DomainError::Validation("title cannot be empty".into())
                    }
                    CNT_ARTICLE_ROT_REPORTER => {
                        DomainError::Validation("rotten articles require a reporter".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
