//! Prose template every post is generated from
//!
//! Bracketed markers such as `[tool name]` are filled in by the model.

/// Literal text every generated post must begin with
pub const START_MARKER: &str = "📘 Tool Name:";

/// Default post template
pub const PLAN_TEMPLATE: &str = r#"
📘 Tool Name: [tool name]
🔗 Official Site: [url]
🎥 Explainer Video: [youtube video link]
🧑‍💻 AIC Contributor: AIC Community


🧩 Quick Look: [Simple breakdown - keep it to under 7 words]
Beginner Benefit: [Simple breakdown - keep it to under 7 words]

🌟 [tool name] 101:
[explainer 101 section - give brief breakdown. 2 paragraphs, 3 sentences each.]

📚 Key AI Concepts Explained:
[list 3 bullet points of different concepts to consider when using this tool. Make each bullet point
a single sentence (1-2 sentences)]

📖 Words to Know:
[list 3 bullet points of different words to know when using this tool. Make each bullet point a
single sentence (8-12 words)]

🎯 Imagine This:
[give an analogy that a normal person would understand. 1 sentence.]
[give an analogy that a normal person would understand. 1 sentence.]

🌟 Fun Fact About the Tool:
[Provide a surprising or little-known fun fact about the tool, its history, or its creators. 1 sentence.]
[Provide a surprising or little-known fun fact about the tool, its history, or its creators. 1 sentence.]
[Provide a surprising or little-known fun fact about the tool, its history, or its creators. 1 sentence.]

✅ Pros:
● [3 bullet points of pros - 8-12 words]

❌ Cons:
● [3 bullet points of cons - 8-12 words]

🧪 Use Cases:
1. [3 bullet points of use cases - 8-12 words]

💰 Pricing Breakdown:
[Based on the scraped text, find and summarize the tool's pricing structure. Mention if there is a free trial or free tier. If no pricing is found, state that pricing information was not readily available on the homepage.]

🌟 Real-World Examples:
[Provide 3 relatable, real-world examples of how a beginner (like a student, a small business owner, or a content creator) might use this tool. 1-2 sentences each, focusing on practical outcomes.]

💡 Initial Warnings:
● [3 bullet points of initial warning a new user should consider before signing up. 1-2
sentences 12-20 words]




🚀 Getting Started:
1. [3-6 numbered steps on how to get started. 1 sentence per step (8-12 words). Include
affiliate link and steps users have to do to sign up]

💡 Power-Ups:
● [3 bullet points for more advanced users. 1-2 sentence answer (15-20 words per
sentence)]

🎯 Difficulty Score: [Rank from 1-10]/10 [Emoji] ([Descriptor])
[1 paragraph, 4 sentences. Provide a ranking score for someone new to using this. 1 being super easy, 10 being advanced expert. Rank usability, enjoyment, benefits of use, skills needed to use this, benefit and negative. Do not make false claims on anything throughout the content]

<p></p>

⭐ Official AI-Driven Rating: [Rank from 1-10]/10
[1 paragraph, 4 sentences. Provide a ranking score for someone new to using this. 1 being super easy, 10 being advanced expert. Give your unbiased opinion. Do not make false claims on anything throughout the content. Mention why you like it. Show points awarded and deducted to prove why you gave this score.]

<hr />

🔎 Deeper Look at [tool name]

🎯 Why [tool name] is Ideal for [Specific Audience]

    <p>Ready to level up your workflow? [tool name] is the AI sidekick you’ve been waiting for. Whether you’re a solo creator building the next big thing or part of a large team, [tool name] is designed to make your life easier. Think of it as a tireless assistant that’s fluent in the tasks you need to accomplish.</p>
    <p>For [Specific Audience], [tool name] is a game-changer. It’s not just about working faster; it’s about working *smarter*. [tool name] can help you brainstorm solutions to complex problems, automate tedious tasks, and even learn new skills on the fly.</p>
    <p>But it’s not just for beginners. Seasoned professionals can use [tool name] to streamline their process, generate boilerplate content, and explore new creative avenues. It’s like having an expert on call 24/7, ready to offer suggestions and insights. By handling the grunt work, [tool name] frees you up to focus on what really matters: creating amazing things.</p>

<p></p>

🔑 Key Features of [tool name]: In-Depth Breakdown

[tool name] is more than just a simple tool. It’s a powerful platform with a suite of features designed to supercharge your workflow. Let’s dive into some of the key features that make [tool name] a must-have.

Feature 1: [Brief Feature Title]
[Detailed description of the feature, its benefits, and how it works. Explain what makes this feature stand out and why it's valuable to the user. Use real-world examples if possible.]

Feature 2: [Brief Feature Title]
[Detailed description of the feature, its benefits, and how it works. Explain what makes this feature stand out and why it's valuable to the user. Use real-world examples if possible.]

Feature 3: [Brief Feature Title]
[Detailed description of the feature, its benefits, and how it works. Explain what makes this feature stand out and why it's valuable to the user. Use real-world examples if possible.]

🚀 Real-World Case Studies Using [tool name]

Don’t just take our word for it. Here are a few real-world examples of how people are using [tool name] to do amazing things.

    <p>Startup Saves Hours on [Task]: A small startup was struggling to keep up with their content creation. By using [tool name] to generate ideas and draft initial content, they were able to save over 10 hours per week. This allowed them to focus on their core product and ship features faster.</p>
    <p>Student Aces a Project: A student with no prior experience in [field] wanted to build a project for a class. Using [tool name], they were able to learn the basics and build a functional prototype in just a few days.</p>
    <p>Open Source Project Improves Documentation: A popular open-source project was struggling with outdated documentation. By using [tool name] to help write and revise their docs, they were able to create a more welcoming and accessible resource for their community.</p>
❓ FAQ - 5 questions and answers that are trending on Google that need answers.
[Answer the trending questions provided with the tool information first. Where fewer than 5 were provided, fill the remaining slots with the questions below.]

1.  Is [tool name] better than [Competitor]?
    While both are excellent, [tool name]’s specific features for [task] give it an edge. Its intuitive interface and powerful automation capabilities can be a huge advantage for [Specific Audience].

2.  How much does [tool name] cost?
    [tool name] offers a variety of pricing plans, including a free tier for getting started. For more advanced features, they offer paid plans that are competitively priced.

3.  Can [tool name] help me with [specific task]?
    Absolutely! [tool name] is a fantastic tool for [specific task]. You can describe what you need, and [tool name] will help you get it done.

4.  Is [tool name] safe to use with my data?
    The creators of [tool name] have robust privacy and security measures in place to protect your data. However, it’s always a good idea to be cautious when sharing sensitive information with any third-party service.

5.  How can I get started with [tool name]?
    Getting started with [tool name] is easy! Just head over to their website and you can sign up for a free account and start exploring its features right away.

⚖️ Stay Safe:
The tools and information on this site are aggregated from community contributions and internet sources. We strongly recommend users independently verify all details, consult original resources for accuracy, and exercise caution. The information, including company profiles, pricing, rules, and structures, is based on current knowledge as of 12:55 PM EDT on Friday, August 22, 2025, and is subject to change at the discretion of the respective entities.

This site is provided "as-is" with no warranties, and no professional, financial, or legal advice is offered or implied. We disclaim all liability for errors, omissions, damages, or losses arising from the use of this information. This platform is intended to showcase tools for informational purposes only and does not endorse or advise on financial investments or decisions. Users must conduct their own due diligence (DYOR), verify the authenticity of tool websites to avoid phishing scams, and secure accounts with strong passwords and two-factor authentication.

AIC is not responsible for the performance, safety, outcomes, or risks associated with any listed tools. Some links on this site may be affiliate links, meaning we may earn a commission if you click and make a purchase, at no additional cost to you. Always research thoroughly, comply with local laws and regulations, and consult qualified financial or legal professionals before taking action to understand potential risks. Nothing herein constitutes professional advice, and all decisions are at the user’s sole discretion. This disclaimer is governed by the laws of St. Petersburg, Florida, USA.
"#;
