//! Session-level reading and writing of MIDI byte streams.
//!
//! A [`Reader`](struct.Reader.html) decodes raw bytes, annotates each message through its
//! [`Decorator`](trait.Decorator.html), notifies real-time [`Observers`](struct.Observers.html)
//! and pushes the message to its [`Sink`](trait.Sink.html).
//! A [`Writer`](struct.Writer.html) encodes messages and optionally publishes them to its sink
//! too, so that a single sink can observe both directions of a connection.

use crate::{
    live::{encode, Decoder},
    message::Message,
    realtime::Observers,
    sink::Sink,
    prelude::*,
};

/// Computes the annotation attached to each decoded message.
///
/// Any `FnMut(&Message) -> M` closure is a decorator.
pub trait Decorator {
    type Meta;

    fn decorate(&mut self, msg: &Message) -> Self::Meta;
}
impl<M, F: FnMut(&Message) -> M> Decorator for F {
    type Meta = M;

    #[inline]
    fn decorate(&mut self, msg: &Message) -> M {
        self(msg)
    }
}

/// The default decorator, attaching no annotation.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDecorator;
impl Decorator for NoDecorator {
    type Meta = ();

    #[inline]
    fn decorate(&mut self, _msg: &Message) {}
}

/// Decodes a MIDI byte stream into a sink.
///
/// A reader owns the running status of its stream, so consecutive calls to
/// [`read`](#method.read) may split the stream between messages, and a message sent under
/// running status may start a new buffer without its status byte.
/// Every buffer must hold whole messages: one cut in the middle fails to decode.
#[derive(Debug)]
pub struct Reader<S, D = NoDecorator> {
    decoder: Decoder,
    decorator: D,
    sink: S,
    observers: Option<Observers>,
}
impl<S> Reader<S> {
    #[inline]
    pub fn new(sink: S) -> Reader<S> {
        Reader {
            decoder: Decoder::new(),
            decorator: NoDecorator,
            sink,
            observers: None,
        }
    }
}
impl<S, D> Reader<S, D> {
    /// Replace the decorator computing message annotations.
    #[inline]
    pub fn with_decorator<E: Decorator>(self, decorator: E) -> Reader<S, E> {
        Reader {
            decoder: self.decoder,
            decorator,
            sink: self.sink,
            observers: self.observers,
        }
    }

    /// Notify the given observers of every decoded System Real Time message.
    #[inline]
    pub fn with_observers(mut self, observers: Observers) -> Reader<S, D> {
        self.observers = Some(observers);
        self
    }

    #[inline]
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    #[inline]
    pub fn decoder_mut(&mut self) -> &mut Decoder {
        &mut self.decoder
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[inline]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Decode every message in `buf`, pushing each one to the sink exactly once.
    ///
    /// Messages with a status the codec does not model are skipped without reaching the sink.
    /// Returns the amount of messages pushed.
    /// On error, the messages decoded before the failing one have already been pushed.
    pub fn read(&mut self, buf: &[u8]) -> Result<usize>
    where
        D: Decorator,
        S: Sink<D::Meta>,
    {
        let mut count = 0;
        for msg in self.decoder.messages(buf) {
            let msg = msg?;
            if let (Some(observers), Some(status)) = (&self.observers, msg.status().as_realtime())
            {
                observers.notify(status);
            }
            let meta = self.decorator.decorate(&msg);
            self.sink.next(msg.annotate(meta));
            count += 1;
        }
        Ok(count)
    }
}

/// Options for a [`Writer`](struct.Writer.html).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Push every successfully written message to the writer's sink.
    pub publish: bool,
}

/// Encodes messages, optionally publishing them to a sink.
#[derive(Debug)]
pub struct Writer<S> {
    options: WriterOptions,
    sink: S,
}
impl<S> Writer<S> {
    #[inline]
    pub fn new(sink: S) -> Writer<S> {
        Writer::with_options(sink, WriterOptions::default())
    }

    #[inline]
    pub fn with_options(sink: S, options: WriterOptions) -> Writer<S> {
        Writer { options, sink }
    }

    #[inline]
    pub fn options(&self) -> WriterOptions {
        self.options
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Encode a message into its wire bytes.
    ///
    /// If the `publish` option is set, the message is also pushed to the sink, but only once it
    /// has been encoded successfully.
    pub fn write<M: Clone>(&mut self, msg: &Message<M>) -> Result<Vec<u8>>
    where
        S: Sink<M>,
    {
        let raw = encode(msg)?;
        if self.options.publish {
            self.sink.next(msg.clone());
        }
        Ok(raw)
    }
}
