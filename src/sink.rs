//! The boundary decoded messages are published through.
//!
//! A sink receives each decoded message exactly once and decides what to do with it.
//! The codec does not assume anything about consumers: sending to a `crossbeam-channel` queue
//! hands messages over to any thread, collecting into a `Vec` keeps them around for later.

use crate::{message::Message, prelude::*};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

/// A consumer of decoded (or written) messages.
pub trait Sink<M = ()> {
    /// Receive a single message.
    fn next(&mut self, msg: Message<M>);
}

impl<M> Sink<M> for Vec<Message<M>> {
    #[inline]
    fn next(&mut self, msg: Message<M>) {
        self.push(msg);
    }
}

impl<M> Sink<M> for Sender<Message<M>> {
    fn next(&mut self, msg: Message<M>) {
        if let Err(err) = self.send(msg) {
            debug!(status = ?err.0.status(), "message receiver hung up, dropping message");
        }
    }
}

impl<M, S: Sink<M> + ?Sized> Sink<M> for &mut S {
    #[inline]
    fn next(&mut self, msg: Message<M>) {
        (**self).next(msg);
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);
impl<M, F: FnMut(Message<M>)> Sink<M> for FnSink<F> {
    #[inline]
    fn next(&mut self, msg: Message<M>) {
        (self.0)(msg);
    }
}

/// Forwards to the inner sink only the messages with a given status.
#[derive(Clone, Debug)]
pub struct Filtered<S> {
    status: Status,
    inner: S,
}
impl<S> Filtered<S> {
    #[inline]
    pub fn new(status: Status, inner: S) -> Filtered<S> {
        Filtered { status, inner }
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}
impl<M, S: Sink<M>> Sink<M> for Filtered<S> {
    #[inline]
    fn next(&mut self, msg: Message<M>) {
        if msg.status() == self.status {
            self.inner.next(msg);
        }
    }
}

/// Create an unbounded message queue, whose sending half is a [`Sink`](trait.Sink.html).
#[inline]
pub fn message_channel<M>() -> (Sender<Message<M>>, Receiver<Message<M>>) {
    unbounded()
}
