use sdk::cosmwasm_std::Event;

pub trait Emit
where
    Self: Sized,
{
    fn emit<K, V>(self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>;

    fn emit_to_string_value<K, V>(self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.emit(event_key, event_value.to_string())
    }
}

/// The contract's structured logging channel, surfaced as a typed ledger
/// event per invocation.
pub struct Emitter {
    event: Event,
}

impl Emitter {
    pub fn of_type<T>(event_type: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            event: Event::new(event_type),
        }
    }

    pub(crate) fn into_event(self) -> Event {
        self.event
    }
}

impl Emit for Emitter {
    fn emit<K, V>(mut self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.event = self.event.add_attribute(event_key, event_value);
        self
    }
}
