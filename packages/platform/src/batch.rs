use std::vec;

use sdk::cosmwasm_ext::{CosmosMsg, SubMsg};

pub use crate::emit::{Emit, Emitter};

pub type ReplyId = u64;

#[must_use]
#[derive(Default)]
#[cfg_attr(any(debug_assertions, test, feature = "testing"), derive(Debug, PartialEq))]
pub struct Batch {
    msgs: Vec<SubMsg>,
}

impl Batch {
    pub fn schedule_no_reply<M>(self, msg: M) -> Self
    where
        M: Into<CosmosMsg>,
    {
        self.schedule_msg(SubMsg::new(msg))
    }

    /// Schedules a message whose settlement outcome must be learned later,
    /// success or failure alike.
    pub fn schedule_reply_always<M>(self, msg: M, reply_id: ReplyId) -> Self
    where
        M: Into<CosmosMsg>,
    {
        self.schedule_msg(SubMsg::reply_always(msg, reply_id))
    }

    pub fn merge(mut self, mut other: Batch) -> Self {
        self.msgs.append(&mut other.msgs);

        self
    }

    pub fn len(&self) -> usize {
        self.msgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    #[inline]
    fn schedule_msg(mut self, msg: SubMsg) -> Self {
        self.msgs.push(msg);
        self
    }
}

impl IntoIterator for Batch {
    type Item = SubMsg;

    type IntoIter = vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.msgs.into_iter()
    }
}

#[cfg(test)]
mod test {
    use sdk::cosmwasm_ext::CosmosMsg;
    use sdk::cosmwasm_std::{BankMsg, ReplyOn};

    use super::Batch;

    fn send() -> CosmosMsg {
        BankMsg::Send {
            to_address: "dest".into(),
            amount: vec![],
        }
        .into()
    }

    #[test]
    fn empty() {
        let b = Batch::default();
        assert_eq!(0, b.len());
        assert!(b.is_empty());
    }

    #[test]
    fn msgs_len() {
        let b = Batch::default()
            .schedule_no_reply(send())
            .schedule_reply_always(send(), 7);
        assert_eq!(2, b.len());
        assert!(!b.is_empty());

        let msgs: Vec<_> = b.into_iter().collect();
        assert_eq!(ReplyOn::Never, msgs[0].reply_on);
        assert_eq!(ReplyOn::Always, msgs[1].reply_on);
        assert_eq!(7, msgs[1].id);
    }

    #[test]
    fn merge() {
        let b = Batch::default().schedule_no_reply(send());
        let other = Batch::default().schedule_no_reply(send());
        assert_eq!(2, b.merge(other).len());
    }
}
