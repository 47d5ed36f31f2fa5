//! Letters written into an empty template directory on first start.
//!
//! All of them are generic English templates: no level or ideology
//! targeting, so they sit at the generic step of the matching cascade and
//! act as the fallback for every representative.

/// `(file name, subject, body)` of each seeded template.
pub const DEFAULT_TEMPLATES: [(&str, &str, &str); 5] = [
    (
        "template-urgent-support.json",
        "Urgent: Your Constituent from {{PostalCode}} Asks You to Support Human Rights in Iran",
        r"Dear {{RepresentativeTitle}},

I am writing to you as your constituent living in {{RidingName}} (postal code {{PostalCode}}) to express my deep concern about the ongoing human rights crisis in Iran.

Unarmed civilians are being shot with live ammunition in the streets, and internet shutdowns are used to hide these killings from the world.

I urge you to:

1. Publicly condemn the use of lethal force against peaceful protesters
2. Support targeted Magnitsky sanctions against the officials responsible
3. Demand the restoration of internet access in Iran
4. Advocate for the release of political prisoners
5. Support the Iranian people's right to determine their own future

As your constituent from {{PostalCode}}, I am counting on you to be a voice for the voiceless.

Thank you for your attention to this critical matter.
",
    ),
    (
        "template-stand-with-iran.json",
        "From {{PostalCode}}: Stand with the Iranian People Against Regime Violence",
        r"Dear {{RepresentativeTitle}},

I am reaching out as your constituent from {{RidingName}}, postal code {{PostalCode}}, regarding the violence being inflicted on the Iranian people by their own government.

Protesters with nothing but their bare hands are facing live fire, while repeated internet blackouts keep the world from seeing it.

Canada has long championed human rights. I ask that you:

- Condemn the use of lethal force against civilians
- Call for the immediate restoration of internet access in Iran
- Support Magnitsky sanctions against those ordering these killings
- Engage with Iranian-Canadian communities on this issue

As a resident of {{PostalCode}} in your riding, I urge you to stand with the Iranian people.

Thank you for your time and consideration.
",
    ),
    (
        "template-action-request.json",
        "Action Needed: Your Constituent from {{PostalCode}} on Iran's Human Rights Crisis",
        r"Dear {{RepresentativeTitle}},

I write to you as a resident of {{RidingName}} ({{PostalCode}}) regarding the ongoing killing of protesters in Iran.

Thousands have been killed and tens of thousands imprisoned, and internet blackouts are used to hide the scale of it.

As my elected representative, I respectfully request that you:

1. Publicly condemn the killing of peaceful protesters
2. Demand an end to the internet blackouts
3. Support Magnitsky sanctions against the officials responsible
4. Meet with Iranian-Canadian constituents to understand the crisis
5. Advocate for the protection of refugees fleeing persecution

My postal code is {{PostalCode}}. I am your constituent and I vote.

I look forward to your response.
",
    ),
    (
        "template-constituent-plea.json",
        "A Plea from Your Constituent ({{PostalCode}}): Stop the Massacre in Iran",
        r"Dear {{RepresentativeTitle}},

As a constituent of {{RidingName}}, writing from postal code {{PostalCode}}, I am compelled to bring the ongoing massacre in Iran to your attention.

Young men and women are being shot for demanding freedom, and the internet is cut so that it happens away from the eyes of the world.

I am asking you to take concrete action:

- Speak publicly against the killing of civilians
- Demand the immediate restoration of internet access in Iran
- Advocate for targeted Magnitsky sanctions
- Support humanitarian assistance for victims and their families

I live at {{PostalCode}} in your riding. Please act.

Thank you for representing our community and our values.
",
    ),
    (
        "template-voice-for-iran.json",
        "Constituent from {{PostalCode}}: Be a Voice for the Voiceless in Iran",
        r"Dear {{RepresentativeTitle}},

I am your constituent from {{RidingName}}, postal code {{PostalCode}}, writing on behalf of millions who cannot speak freely: the people of Iran.

Peaceful protesters are being fired upon, and when the killing begins the internet goes dark.

Here is how you can help:

- Champion sanctions against those responsible in the Iranian regime
- Demand an end to internet blackouts in Iran
- Press for an international investigation into crimes against humanity
- Ensure Iranian-Canadians have a voice in policy discussions

I am writing from {{PostalCode}}. I am asking you to be a voice for the voiceless.

With hope and urgency,
",
    ),
];

/// Tags attached to every seeded template.
pub const DEFAULT_TAGS: [&str; 2] = ["human-rights", "iran"];
