use {
    model::{WithdrawalRequest, drops::format_xah},
    std::fmt::{self, Display, Formatter},
};

/// Human readable rendition of a request with decoded memos.
pub struct Summary<'a>(pub &'a WithdrawalRequest);

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let request = self.0;
        match request.operation() {
            Some(operation) => writeln!(f, "operation: {operation}")?,
            None => writeln!(f, "operation: unknown")?,
        }
        writeln!(f, "account: {}", request.account)?;
        writeln!(f, "destination: {}", request.destination)?;
        writeln!(f, "user_wallet: {}", request.user_wallet)?;
        writeln!(f, "destination_tag: {}", request.destination_tag)?;
        writeln!(
            f,
            "amount: {} drops ({} XAH)",
            request.amount,
            format_xah(request.amount)
        )?;
        writeln!(f, "fee: {} drops", request.fee)?;
        writeln!(
            f,
            "flags: {} (canonical signature {})",
            request.flags.bits(),
            if request.flags.requires_canonical_sig() {
                "required"
            } else {
                "not required"
            }
        )?;
        for (i, memo) in request.memos.iter().enumerate() {
            let text = memo.to_text();
            writeln!(
                f,
                "memo {i}: data {:?}, type {:?}, format {:?}",
                text.data, text.memo_type, text.format
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, model::build_withdrawal_request};

    #[test]
    fn summarizes_request() {
        let request = build_withdrawal_request(
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "rrrrrrrrrrrrrrrrrrrrBZbvji",
            "rrrrrrrrrrrrrrrrrrrrrhoLvTp",
            "3000000",
            "2495",
            7,
        )
        .unwrap();

        assert_eq!(
            Summary(&request).to_string(),
            "operation: withdraw\n\
             account: rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh\n\
             destination: rrrrrrrrrrrrrrrrrrrrBZbvji\n\
             user_wallet: rrrrrrrrrrrrrrrrrrrrrhoLvTp\n\
             destination_tag: 7\n\
             amount: 3000000 drops (3.000000 XAH)\n\
             fee: 2495 drops\n\
             flags: 2147483648 (canonical signature required)\n\
             memo 0: data \"withdraw\", type \"huxtext\", format \"text\"\n"
        );
    }
}
