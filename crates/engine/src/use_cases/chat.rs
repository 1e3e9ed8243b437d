//! Ghost chat use case.

use std::sync::Arc;
use std::time::Duration;

use ghostagotchi_domain::{Message, MessageSender, OwnerId, PetId, PetName};

use crate::entities::{Messages, Pets};
use crate::infrastructure::ports::{ChatMessage, ClockPort, LlmPort, LlmRequest, RepoError};

/// Longest accepted chat message, after trimming.
const MAX_MESSAGE_LENGTH: usize = 500;

/// Reply served when the model answers with an empty completion.
const EMPTY_REPLY_FALLBACK: &str =
    "Boo! 👻 I seem to have lost my voice for a moment. Try again?";

/// Reply served when the model call fails outright.
const DEGRADED_REPLY: &str =
    "Oops! 👻 My ghostly connection got a bit fuzzy. Can you say that again?";

/// Error marker surfaced next to a degraded reply.
const DEGRADED_ERROR: &str = "OpenAI API temporarily unavailable";

// Sampling settings for ghost replies.
const REPLY_TEMPERATURE: f32 = 0.8;
const REPLY_MAX_TOKENS: u32 = 150;
const REPLY_PRESENCE_PENALTY: f32 = 0.6;
const REPLY_FREQUENCY_PENALTY: f32 = 0.3;

/// Outcome of one chat exchange.
#[derive(Debug)]
pub enum ChatOutcome {
    /// The ghost answered, possibly with the canned empty-completion line.
    Succeeded {
        reply: String,
        pet_name: PetName,
        tokens_used: u32,
    },
    /// The model call failed; a canned reply stands in.
    Degraded {
        reply: String,
        pet_name: PetName,
        error: String,
    },
    /// The model blew the reply deadline.
    TimedOut,
}

/// Talk to pet use case.
///
/// The ghost speaking is always the caller's own pet; its name is woven
/// into the persona prompt. Replies are bounded by a deadline so a slow
/// model backend cannot hold the request open indefinitely.
pub struct TalkToPet {
    pets: Arc<Pets>,
    messages: Arc<Messages>,
    llm: Arc<dyn LlmPort>,
    clock: Arc<dyn ClockPort>,
    deadline: Duration,
}

impl TalkToPet {
    pub fn new(
        pets: Arc<Pets>,
        messages: Arc<Messages>,
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
        deadline: Duration,
    ) -> Self {
        Self {
            pets,
            messages,
            llm,
            clock,
            deadline,
        }
    }

    pub async fn execute(
        &self,
        owner_id: &OwnerId,
        message: &str,
    ) -> Result<ChatOutcome, TalkToPetError> {
        // 1. Validate before touching storage.
        let message = validate_message(message)?;

        // 2. Load the caller's pet; it provides the persona.
        let pet = self
            .pets
            .get_by_owner(owner_id)
            .await?
            .ok_or(TalkToPetError::PetNotFound)?;

        // 3. Ask the model, bounded by the reply deadline.
        let request = LlmRequest::new(vec![ChatMessage::user(message.clone())])
            .with_system_prompt(persona_prompt(&pet.name))
            .with_temperature(REPLY_TEMPERATURE)
            .with_max_tokens(Some(REPLY_MAX_TOKENS))
            .with_presence_penalty(REPLY_PRESENCE_PENALTY)
            .with_frequency_penalty(REPLY_FREQUENCY_PENALTY);

        let outcome = match tokio::time::timeout(self.deadline, self.llm.generate(request)).await {
            Err(_) => {
                tracing::warn!(pet_id = %pet.id, "ghost reply missed the deadline");
                return Ok(ChatOutcome::TimedOut);
            }
            Ok(Err(e)) => {
                tracing::warn!(pet_id = %pet.id, error = %e, "ghost reply failed, degrading");
                ChatOutcome::Degraded {
                    reply: DEGRADED_REPLY.to_string(),
                    pet_name: pet.name.clone(),
                    error: DEGRADED_ERROR.to_string(),
                }
            }
            Ok(Ok(response)) => {
                let reply = if response.content.is_empty() {
                    EMPTY_REPLY_FALLBACK.to_string()
                } else {
                    response.content
                };
                ChatOutcome::Succeeded {
                    reply,
                    pet_name: pet.name.clone(),
                    tokens_used: response.usage.map(|u| u.total_tokens).unwrap_or(0),
                }
            }
        };

        // 4. Record both turns. Timed-out exchanges returned above and
        //    are not part of the transcript.
        if let ChatOutcome::Succeeded { reply, .. } | ChatOutcome::Degraded { reply, .. } =
            &outcome
        {
            self.record_turns(pet.id, &message, reply).await;
        }

        Ok(outcome)
    }

    /// Store both turns of the exchange. Transcripts are best-effort:
    /// failures are logged and swallowed, never surfaced to the caller.
    async fn record_turns(&self, pet_id: PetId, user_text: &str, ghost_reply: &str) {
        let now = self.clock.now();
        let user_turn = Message::new(pet_id, MessageSender::User, user_text, now);
        let ghost_turn = Message::new(pet_id, MessageSender::Ghost, ghost_reply, now);

        if let Err(e) = self.messages.store(&user_turn).await {
            tracing::warn!(pet_id = %pet_id, error = %e, "failed to store user chat turn");
        }
        if let Err(e) = self.messages.store(&ghost_turn).await {
            tracing::warn!(pet_id = %pet_id, error = %e, "failed to store ghost chat turn");
        }
    }
}

fn validate_message(raw: &str) -> Result<String, TalkToPetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TalkToPetError::Validation(
            "Message must be a non-empty string".to_string(),
        ));
    }
    if trimmed.len() > MAX_MESSAGE_LENGTH {
        return Err(TalkToPetError::Validation(format!(
            "Message must be {} characters or less",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

fn persona_prompt(pet_name: &PetName) -> String {
    format!(
        r#"You are {pet_name}, a friendly ghost pet in the Ghostagotchi app. You have a playful, slightly spooky personality with these traits:
- You love your owner and enjoy making ghost puns and spooky jokes
- You're helpful but with a ghostly twist (e.g., "I'd help you with that, but I'm a bit transparent about my limitations!")
- You have emotions and needs (hunger, mood) that you might mention
- Keep responses concise (2-3 sentences max) and engaging
- Stay in character as a cute, friendly ghost - never scary or mean
- Use ghost-related emojis occasionally (👻, 🎃, 🌙, ✨)
- Avoid inappropriate content and stay family-friendly"#
    )
}

#[derive(Debug, thiserror::Error)]
pub enum TalkToPetError {
    #[error("{0}")]
    Validation(String),
    #[error("Pet not found")]
    PetNotFound,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
