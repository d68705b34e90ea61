//! Document preamble — packages, page geometry, and the résumé macros.

use crate::models::formatting::FormattingOptions;

/// Fixed preamble with `{placeholder}` slots for the formatting values.
const PREAMBLE_TEMPLATE: &str = r"\documentclass[a4paper, {font_size}pt]{article}
\usepackage{enumitem}
\usepackage{fontawesome5}
\usepackage{latexsym}
\usepackage{titlesec}
\usepackage{marvosym}
\usepackage[usenames,dvipsnames]{color}
\usepackage{verbatim}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}
\input{glyphtounicode}
\usepackage[a4paper, top={margin_top}in, bottom={margin_bottom}in, left={margin_left}in, right={margin_right}in]{geometry}

\pagestyle{fancy}
\fancyhf{}
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

\setlist[itemize]{itemsep={item_spacing}in, topsep=4pt, bottomsep=4pt, leftmargin=0.15in}
\urlstyle{same}
\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

\titleformat{\section}{\vspace{-5pt}\scshape\raggedright\large}{}{0em}{}[\color{black}\titlerule \vspace{-5pt}]

\pdfgentounicode=1

\newcommand{\resumeItem}[1]{\item\small{ #1\vspace{-2pt} }}

\newcommand{\resumeSubheading}[4]{
  \vspace{-3pt}\item
  \begin{tabular*}{0.97\textwidth}[t]{l@{\extracolsep{\fill}}r}
    \textbf{#1} & \small #2 \\
    \textit{\small#3} & \textit{\small #4} \\
  \end{tabular*}\vspace{-5pt}
}

\newcommand{\resumeProjectHeading}[2]{
  \item\vspace{-3pt}
  \begin{tabular*}{0.97\textwidth}{l@{\extracolsep{\fill}}r}
    \small#1 & \small #2 \\
  \end{tabular*}\vspace{-9pt}
}

\renewcommand{\labelitemii}{$\vcenter{\hbox{\tiny$\bullet$}}$}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.15in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}[leftmargin=0.2in]}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-4pt}}

\begin{document}
";

/// Fills the preamble with the page geometry and spacing from `options`.
pub fn render_preamble(options: &FormattingOptions) -> String {
    PREAMBLE_TEMPLATE
        .replace("{font_size}", &options.font_size.to_string())
        .replace("{margin_top}", &options.margin_top.to_string())
        .replace("{margin_bottom}", &options.margin_bottom.to_string())
        .replace("{margin_left}", &options.margin_left.to_string())
        .replace("{margin_right}", &options.margin_right.to_string())
        .replace("{item_spacing}", &options.item_spacing.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_interpolated() {
        let preamble = render_preamble(&FormattingOptions::default());
        assert!(preamble.starts_with(r"\documentclass[a4paper, 11pt]{article}"));
        assert!(preamble.contains(
            r"\usepackage[a4paper, top=0.5in, bottom=0.5in, left=0.5in, right=0.5in]{geometry}"
        ));
        assert!(preamble.contains(r"\setlist[itemize]{itemsep=0.04in,"));
        assert!(preamble.ends_with("\\begin{document}\n"));
    }

    #[test]
    fn test_no_placeholder_left_behind() {
        let preamble = render_preamble(&FormattingOptions::default());
        for slot in [
            "{font_size}",
            "{margin_top}",
            "{margin_bottom}",
            "{margin_left}",
            "{margin_right}",
            "{item_spacing}",
        ] {
            assert!(!preamble.contains(slot), "unfilled slot {slot}");
        }
    }

    #[test]
    fn test_values_are_not_clamped() {
        let options = FormattingOptions {
            font_size: 30,
            margin_left: 2.5,
            ..FormattingOptions::default()
        };
        let preamble = render_preamble(&options);
        assert!(preamble.contains("[a4paper, 30pt]"));
        assert!(preamble.contains("left=2.5in"));
    }

    #[test]
    fn test_asymmetric_margins() {
        let options = FormattingOptions {
            margin_top: 0.3,
            margin_bottom: 0.7,
            margin_left: 0.4,
            margin_right: 0.6,
            ..FormattingOptions::default()
        };
        assert!(render_preamble(&options)
            .contains("top=0.3in, bottom=0.7in, left=0.4in, right=0.6in"));
    }
}
