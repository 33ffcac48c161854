use crate::{consts::COMMENT_POST_PATH, dispatcher::Dispatcher, error::Result};
use rednote_signer::Signer;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// User mentioned in a comment
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct AtUser {
    pub user_id: String,
    pub nickname: String,
}

/// Parameters of the "post a comment to a note" operation
#[derive(Clone, Debug, TypedBuilder)]
pub struct CommentParams {
    /// ID of the note to comment on
    #[builder(setter(into))]
    pub note_id: String,

    /// Text of the comment
    #[builder(setter(into))]
    pub content: String,

    /// Users mentioned in the comment
    #[builder(default)]
    pub at_users: Vec<AtUser>,
}

/// Wire shape of the endpoint. Field order is the key order of the body.
#[derive(Serialize)]
struct CommentPayload<'a> {
    note_id: &'a str,
    content: &'a str,
    at_users: &'a [AtUser],
}

impl<'a> From<&'a CommentParams> for CommentPayload<'a> {
    fn from(params: &'a CommentParams) -> Self {
        Self {
            note_id: &params.note_id,
            content: &params.content,
            at_users: &params.at_users,
        }
    }
}

impl<S> Dispatcher<S>
where
    S: Signer,
{
    /// Post a comment to a note
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::post_to`]
    #[instrument(skip_all, fields(note_id = %params.note_id))]
    pub async fn post_comment<R>(&self, params: &CommentParams, cookie: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.post(COMMENT_POST_PATH, &CommentPayload::from(params), cookie)
            .await
    }
}
