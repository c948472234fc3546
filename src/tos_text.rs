//! Sample Terms of Service text used by the demo sign-up form.

pub const SAMPLE_TERMS: &str = r#"TERMS OF SERVICE

Last Updated: October 2026

Please read these terms carefully. The approval checkbox below stays locked
until you have scrolled to the end of this text.

1. ACCEPTANCE

By creating an account you agree to be bound by these terms. If you do not
agree, close this window and do not create an account.

2. YOUR ACCOUNT

You are responsible for keeping your credentials private and for all activity
under your account. Tell us promptly about any unauthorized use.

3. ACCEPTABLE USE

You agree not to:
  - break the law or help anyone else do so
  - interfere with the operation of the service
  - upload content you do not have the right to share
  - attempt to access accounts or data that are not yours

4. CONTENT

You keep ownership of what you upload. You grant us a limited licence to store
and display it for the purpose of running the service.

5. TERMINATION

You may close your account at any time. We may suspend accounts that violate
these terms, and will tell you why when we can.

6. DISCLAIMER

The service is provided "as is", without warranty of any kind, express or
implied.

7. LIMITATION OF LIABILITY

To the extent permitted by law, we are not liable for indirect or
consequential damages arising from your use of the service.

8. CHANGES

We may update these terms. When we do, you will be asked to read and accept
them again before continuing.

9. CONTACT

Questions about these terms can be sent to the address listed on our website.

END OF TERMS
"#;
