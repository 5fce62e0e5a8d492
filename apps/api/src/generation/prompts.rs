// All LLM prompt constants for the Generation module.
// Placeholders are filled with `llm_client::prompts::fill_template`.

pub const SUMMARY_SYSTEM: &str = "You are an expert resume writer and career coach \
    specializing in ATS-optimized content. You write compelling professional summaries \
    that help candidates stand out.";

/// Replace: {experience_level}, {target_role}, {skills}, {experience_count}, {education},
///          {ats_instruction}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Create a powerful, ATS-optimized professional summary for a {experience_level} {target_role} position.

CANDIDATE PROFILE:
- Experience Level: {experience_level}
- Key Skills: {skills}
- Work Experience: {experience_count} positions
- Education: {education}

REQUIREMENTS:
1. Write 3-4 sentences, 60-80 words in total
2. Open with one strong value proposition
3. Name specific technical skills and areas of expertise
4. Mention depth of experience or key achievements
5. Use confident, action-oriented language
6. {ats_instruction}
7. Tailor it to the {target_role} role
8. Include measurable impact where the profile supports it

OUTPUT FORMAT:
Return ONLY the professional summary text. No labels, no headings, no formatting."#;

pub const BULLETS_SYSTEM: &str =
    "You are an expert resume writer specializing in ATS-optimized content.";

/// Replace: {target_role}, {description}, {technologies}, {project_info},
///          {ats_instruction}, {bullet_format}
pub const PROJECT_BULLETS_PROMPT_TEMPLATE: &str = r#"Create 4-5 compelling bullet points for this project, targeting a {target_role} position.

Project Description: {description}
Technologies: {technologies}
Additional Info: {project_info}

REQUIREMENTS:
- Begin every bullet with a strong action verb (Developed, Implemented, Designed, Optimized, Built)
- Quantify impact wherever possible (improved by X%, reduced by Y, handled Z requests)
- Highlight the technical skills and tools used
- Keep each bullet to 1-2 lines
- Describe achievements, not duties
- {ats_instruction}
- Tailor to the {target_role} role

{bullet_format}"#;

/// Replace: {target_role}, {role}, {company}, {responsibilities}, {technologies},
///          {ats_instruction}, {bullet_format}
pub const EXPERIENCE_BULLETS_PROMPT_TEMPLATE: &str = r#"Create 4-6 compelling bullet points for this work experience, targeting a {target_role} position.

Role: {role}
Company: {company}
Responsibilities: {responsibilities}
Technologies: {technologies}

REQUIREMENTS:
- Begin every bullet with a strong action verb (Led, Developed, Implemented, Architected, Optimized)
- Include measurable achievements (increased by X%, reduced by Y, managed Z projects)
- Emphasize leadership and impact
- Keep each bullet to 1-2 lines
- Focus on results and the value delivered
- {ats_instruction}
- Emphasize skills relevant to {target_role}

{bullet_format}"#;

pub const OPTIMIZE_SYSTEM: &str = "You are an expert in ATS optimization and resume writing.";

/// Replace: {target_role}, {content}, {ats_instruction}
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Optimize the following content for a {target_role} position:

{content}

REQUIREMENTS:
- Use strong action verbs
- Add measurable metrics where possible
- Work in relevant keywords for {target_role}
- {ats_instruction}
- Keep the same overall structure
- Make it more impactful

Return ONLY the optimized content."#;

pub const COMPLETE_RESUME_SYSTEM: &str = "You are an expert resume writer and ATS \
    optimization specialist with 15+ years of experience. Your resumes consistently achieve \
    90+ ATS scores and land interviews at top companies. You know what recruiters and \
    hiring managers look for.";

/// Replace: {experience_level}, {target_role}, {candidate_data}
pub const COMPLETE_RESUME_PROMPT_TEMPLATE: &str = r#"Create an ATS-optimized resume for a {experience_level} {target_role} role.

CANDIDATE DATA:
{candidate_data}

GENERATE:
1. Professional Summary (3-4 sentences featuring the key skills for {target_role})
2. Skills (organized by category, ATS-friendly)
3. Experience (4-5 bullet points per role with action verbs and metrics)
4. Projects (3-4 bullet points per project with technologies and impact)
5. Education (degree, school, years, CGPA)
6. Certifications & Achievements

Make it ATS-optimized, professional and impactful. Use standard formatting."#;

pub const REPOSITORY_SYSTEM: &str = "You are an expert technical resume writer \
    specializing in showcasing software projects effectively.";

/// Replace: {name}, {description}, {technologies}, {readme}, {ats_instruction},
///          {bullet_format}
pub const REPOSITORY_BULLETS_PROMPT_TEMPLATE: &str = r#"Generate 4-5 professional, ATS-optimized bullet points for this GitHub project:

PROJECT: {name}
DESCRIPTION: {description}
TECHNOLOGIES: {technologies}
README EXCERPT: {readme}

REQUIREMENTS:
1. Begin every bullet with a strong action verb (Built, Developed, Implemented, Designed, Created)
2. Include measurable impact or technical achievements
3. Highlight the key technologies and features
4. Keep each bullet to 1-2 lines
5. Describe what was accomplished, not just what was used
6. {ats_instruction}

{bullet_format}"#;
