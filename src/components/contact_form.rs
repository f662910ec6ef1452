use dioxus::prelude::*;

use crate::api::submit_contact;
use crate::fleet::contact::ContactForm as Form;
use crate::shared::types::ContactOutcomeDto;

const INPUT_CLASS: &str = "w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-slate-100 focus:border-emerald-500 focus:outline-none";

#[allow(non_snake_case)]
#[component]
pub fn ContactForm() -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut subject = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut outcome: Signal<Option<ContactOutcomeDto>> = use_signal(|| None);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *sending.read() {
            return;
        }
        let subject_v = subject.read().trim().to_string();
        let form = Form {
            name: name.read().clone(),
            email: email.read().clone(),
            subject: (!subject_v.is_empty()).then_some(subject_v),
            message: message.read().clone(),
        };
        sending.set(true);
        outcome.set(None);
        spawn(async move {
            let result = submit_contact(form).await.unwrap_or_else(|_| ContactOutcomeDto {
                ok: false,
                message: "Failed to send message. Please try again.".into(),
            });
            if result.ok {
                name.set(String::new());
                email.set(String::new());
                subject.set(String::new());
                message.set(String::new());
            }
            outcome.set(Some(result));
            sending.set(false);
        });
    };

    rsx! {
        form { class: "w-full rounded-2xl border border-slate-800 bg-slate-900/60 p-8 space-y-4",
            onsubmit: on_submit,
            h2 { class: "text-2xl font-semibold tracking-tight text-slate-200", "Get in touch" }
            {
                match &*outcome.read() {
                    Some(o) if o.ok => rsx! {
                        div { class: "rounded-lg border border-emerald-700 bg-emerald-950/60 px-4 py-3 text-sm text-emerald-200", role: "status", "{o.message}" }
                    },
                    Some(o) => rsx! {
                        div { class: "rounded-lg border border-rose-700 bg-rose-950/60 px-4 py-3 text-sm text-rose-200", role: "alert", "{o.message}" }
                    },
                    None => rsx!( Fragment {} ),
                }
            }
            div { class: "grid gap-4 sm:grid-cols-2",
                input { class: INPUT_CLASS, name: "name", placeholder: "Your name", value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                input { class: INPUT_CLASS, r#type: "email", name: "email", placeholder: "Email", value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            input { class: INPUT_CLASS, name: "subject", placeholder: "Subject (optional)", value: "{subject}",
                oninput: move |evt| subject.set(evt.value()),
            }
            textarea { class: INPUT_CLASS, name: "message", rows: "5", placeholder: "How can we help?", value: "{message}",
                oninput: move |evt| message.set(evt.value()),
            }
            button {
                class: "rounded-lg bg-emerald-500 px-5 py-2 font-medium text-slate-950 hover:bg-emerald-400 disabled:opacity-50",
                r#type: "submit",
                disabled: *sending.read(),
                if *sending.read() { "Sending..." } else { "Send Message" }
            }
        }
    }
}
