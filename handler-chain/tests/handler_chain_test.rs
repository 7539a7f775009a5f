//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: middleware before/after order, middleware short-circuiting the chain,
//! Reply stopping the handler phase and being passed to middleware after, and
//! multiple handlers executed in order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use gptbot_core::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, Middleware, User,
};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
        attachment: None,
    }
}

struct CountingHandler {
    handle_count: Arc<AtomicUsize>,
    response: HandlerResponse,
}

#[async_trait::async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> gptbot_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// **Test: Middleware before and after run around the handler phase.**
///
/// **Setup:** One counting middleware and one counting handler.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** before=1, handle=1, after=1; response is Continue.
#[tokio::test]
async fn test_middleware_wraps_handler_phase() {
    struct CountingMiddleware {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Middleware for CountingMiddleware {
        async fn before(&self, _message: &Message) -> gptbot_core::Result<bool> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        async fn after(
            &self,
            _message: &Message,
            _response: &HandlerResponse,
        ) -> gptbot_core::Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    let before_count = Arc::new(AtomicUsize::new(0));
    let after_count = Arc::new(AtomicUsize::new(0));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_middleware(Arc::new(CountingMiddleware {
            before_count: before_count.clone(),
            after_count: after_count.clone(),
        }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(handle_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

/// **Test: Middleware before returning false short-circuits; no handler runs.**
///
/// **Setup:** One blocking middleware, one counting handler.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** result is Stop; handle_count=0.
#[tokio::test]
async fn test_middleware_short_circuits_chain() {
    struct BlockingMiddleware;

    #[async_trait::async_trait]
    impl Middleware for BlockingMiddleware {
        async fn before(&self, _message: &Message) -> gptbot_core::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_middleware(Arc::new(BlockingMiddleware))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Reply stops the handler phase and is passed to middleware after.**
///
/// **Setup:** A middleware that captures the response in after(); a handler that
/// returns Reply("AI reply."); a second handler that must never run.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** result is Reply("AI reply."); second handler count stays 0;
/// after sees the reply text.
#[tokio::test]
async fn test_reply_stops_chain_and_reaches_after() {
    struct CaptureMiddleware {
        seen: Arc<std::sync::Mutex<Option<HandlerResponse>>>,
    }

    #[async_trait::async_trait]
    impl Middleware for CaptureMiddleware {
        async fn after(
            &self,
            _message: &Message,
            response: &HandlerResponse,
        ) -> gptbot_core::Result<()> {
            *self.seen.lock().unwrap() = Some(response.clone());
            Ok(())
        }
    }

    let seen = Arc::new(std::sync::Mutex::new(None));
    let late_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_middleware(Arc::new(CaptureMiddleware { seen: seen.clone() }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: Arc::new(AtomicUsize::new(0)),
            response: HandlerResponse::Reply("AI reply.".to_string()),
        }))
        .add_handler(Arc::new(CountingHandler {
            handle_count: late_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("AI reply.".to_string()));
    assert_eq!(late_count.load(Ordering::SeqCst), 0);
    assert_eq!(
        *seen.lock().unwrap(),
        Some(HandlerResponse::Reply("AI reply.".to_string()))
    );
}

/// **Test: Handlers run in registration order until the first Stop.**
///
/// **Setup:** Two handlers pushing their names to a shared vec; first returns
/// Continue, second returns Stop; a third must not run.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** Order is [first, second]; result is Stop.
#[tokio::test]
async fn test_handlers_run_in_order_until_stop() {
    struct OrderHandler {
        name: &'static str,
        order: Arc<std::sync::Mutex<Vec<&'static str>>>,
        response: HandlerResponse,
    }

    #[async_trait::async_trait]
    impl Handler for OrderHandler {
        async fn handle(&self, _message: &Message) -> gptbot_core::Result<HandlerResponse> {
            self.order.lock().unwrap().push(self.name);
            Ok(self.response.clone())
        }
    }

    let order = Arc::new(std::sync::Mutex::new(Vec::new()));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
            response: HandlerResponse::Continue,
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
            response: HandlerResponse::Stop,
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "third",
            order: order.clone(),
            response: HandlerResponse::Continue,
        }));

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}
