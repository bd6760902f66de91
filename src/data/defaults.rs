//! Built-in MaLDReTH lifecycle dataset
//!
//! Used when `lifecycle_data.json` does not exist yet. Twelve stages in cycle
//! order, the forward flow closing the ring plus three feedback loops, and
//! tool exemplars grouped by substage category.

use super::model::{Connection, ConnectionType, Exemplar, LifecycleData, Stage};

const STAGES: &[(&str, &str, &str)] = &[
    (
        "Conceptualise",
        "To formulate the initial research idea or hypothesis, and define the scope of the research project and the data component/requirements of that project.",
        "#90be33",
    ),
    (
        "Plan",
        "To establish a structured strategic framework for management of the research project, outlining aims, objectives, methodologies, and resources required for data collection, management and analysis. Data management plans (DMP) should be established for this phase of the lifecycle.",
        "#90be44",
    ),
    (
        "Fund",
        "To identify and acquire financial resources to support the research project, including data collection, management, analysis, sharing, publishing and preservation.",
        "#90be55",
    ),
    (
        "Collect",
        "To use predefined procedures, methodologies and instruments to acquire and store data that is reliable, fit for purpose and of sufficient quality to test the research hypothesis.",
        "#90be66",
    ),
    (
        "Process",
        "To make new and existing data analysis-ready. This may involve standardised pre-processing, cleaning, reformatting, structuring, filtering, and performing quality control checks on data.",
        "#90be79",
    ),
    (
        "Analyse",
        "To derive insights, knowledge, and understanding from processed data. Data analysis involves iterative exploration and interpretation of experimental or computational results.",
        "#90be83",
    ),
    (
        "Store",
        "To record data using technological media appropriate for processing and analysis whilst maintaining data integrity and security.",
        "#90be9a",
    ),
    (
        "Publish",
        "To release research data in published form for use by others with appropriate metadata for citation (including a unique persistent identifier) based on FAIR principles.",
        "#90beaa",
    ),
    (
        "Preserve",
        "To ensure the safety, integrity, and accessibility of data for as long as necessary so that data is as FAIR as possible.",
        "#90bebb",
    ),
    (
        "Share",
        "To make data available and accessible to humans and/or machines. Data may be shared with project collaborators or published to share it with the wider research community and society at large.",
        "#90becc",
    ),
    (
        "Access",
        "To control and manage data access by designated users and reusers. This may be in the form of publicly available published information. Necessary access control and authentication methods are applied.",
        "#90bedd",
    ),
    (
        "Transform",
        "To create new data from the original, for example: (i) by migration into a different format; (ii) by creating a subset, by selection or query, to create newly derived results, perhaps for publication; or, (iii) combining or appending with other data.",
        "#90beee",
    ),
];

/// Feedback loops drawn as dashed return paths
const ALTERNATIVE_CONNECTIONS: &[(&str, &str)] = &[
    ("Analyse", "Collect"),
    ("Store", "Analyse"),
    ("Process", "Collect"),
];

// (stage, category, tool, description)
#[rustfmt::skip]
const EXEMPLARS: &[(&str, &str, &str, &str)] = &[
    ("Conceptualise", "Mind mapping", "Miro", "Collaborative online whiteboard platform for cross-functional team collaboration"),
    ("Conceptualise", "Mind mapping", "MindMeister", "Online mind mapping software for brainstorming and idea management"),
    ("Conceptualise", "Mind mapping", "XMind", "Full-featured mind mapping and brainstorming tool"),
    ("Conceptualise", "Diagramming", "Lucidchart", "Web-based diagramming application for creating flowcharts, org charts, and more"),
    ("Conceptualise", "Diagramming", "Draw.io", "Free online diagram software for making flowcharts, process diagrams, etc."),
    ("Conceptualise", "Wireframing", "Balsamiq", "Rapid wireframing tool that helps you create mockups quickly"),
    ("Plan", "Data Management Planning", "DMPTool", "Tool for creating data management plans that meet institutional and funder requirements"),
    ("Plan", "Data Management Planning", "DMPonline", "Web-based tool to create, share, and export data management plans"),
    ("Plan", "Project Planning", "Trello", "Web-based Kanban-style list-making application for project management"),
    ("Plan", "Project Planning", "Asana", "Web-based project management tool that helps teams organize and track their work"),
    ("Plan", "Project Planning", "Microsoft Project", "Project management software for project scheduling and resource allocation"),
    ("Plan", "Combined DMP/Project", "Data Stewardship Wizard", "Tool that combines project planning with data management plan creation"),
    ("Fund", "Funding Information", "ResearchProfessional", "Comprehensive database of research funding opportunities"),
    ("Fund", "Funding Information", "Pivot", "Database for discovering funding opportunities and research collaborators"),
    ("Collect", "Quantitative Data", "Open Data Kit", "Open-source tool for mobile data collection"),
    ("Collect", "Quantitative Data", "GBIF", "Global Biodiversity Information Facility for biodiversity data collection"),
    ("Collect", "Qualitative Data", "SurveyMonkey", "Cloud-based survey tool for creating, distributing, and analyzing surveys"),
    ("Collect", "Qualitative Data", "Zooniverse", "Platform for people-powered research through citizen science"),
    ("Collect", "Harvesting", "DROID", "Tool for file format identification"),
    ("Process", "Electronic Lab Notebooks", "RSpace", "Electronic lab notebook software for researchers"),
    ("Process", "Electronic Lab Notebooks", "eLabNext", "Digital lab notebook for organizing research data"),
    ("Process", "Scientific Computing", "Jupyter", "Web application for creating and sharing documents with live code, equations, and visualizations"),
    ("Process", "Metadata Tools", "CEDAR Workbench", "Tool for metadata creation and management in biomedical research"),
    ("Analyse", "Statistical Software", "SPSS", "Software package for statistical analysis"),
    ("Analyse", "Statistical Software", "Matlab", "Multi-paradigm numerical computing environment and programming language"),
    ("Analyse", "Computational Tools", "RStudio", "Integrated development environment for R, a programming language for statistical computing"),
    ("Analyse", "Computational Tools", "Eclipse", "Integrated development environment used in computer programming"),
    ("Store", "Data Repository", "Figshare", "Repository where users can make all of their research outputs available in a citable, shareable and discoverable manner"),
    ("Store", "Data Repository", "Zenodo", "General-purpose open-access repository for research data"),
    ("Store", "Data Repository", "Dataverse", "Open source web application to share, preserve, cite, explore, and analyze research data"),
    ("Store", "Management Tools", "iRODS", "Integrated Rule-Oriented Data System for data management"),
    ("Publish", "Discipline Repository", "NOMAD-OASIS", "Repository for materials science data"),
    ("Publish", "Generalist Repository", "Figshare", "Repository for research outputs including figures, datasets, media, papers, posters, presentations and filesets"),
    ("Publish", "Generalist Repository", "Zenodo", "General-purpose open-access repository"),
    ("Publish", "Metadata Repository", "DataCite Commons", "Repository for storing and sharing metadata"),
    ("Preserve", "Data Repository", "Dataverse", "Repository software for research data preservation"),
    ("Preserve", "Archive", "Archivematica", "Digital preservation system designed to maintain long-term access to digital content"),
    ("Preserve", "Containers", "Docker", "Platform for developing, shipping, and running applications in containers"),
    ("Share", "Data Repository", "Figshare", "Repository for sharing research data and other outputs"),
    ("Share", "Data Repository", "Zenodo", "Repository for sharing research data outputs"),
    ("Share", "Electronic Lab Notebooks", "RSpace", "Platform for sharing lab research data"),
    ("Access", "Data Repository", "CKAN", "Open-source data management system for powering data hubs and data portals"),
    ("Access", "Database", "PostgreSQL", "Open-source relational database system"),
    ("Access", "Database", "MySQL", "Open-source relational database management system"),
    ("Access", "Authentication", "LDAP", "Lightweight Directory Access Protocol for accessing directories"),
    ("Access", "Authentication", "SAML", "Security Assertion Markup Language for exchanging authentication data"),
    ("Transform", "Programming Languages", "Python", "Interpreted high-level programming language for general-purpose programming"),
    ("Transform", "Programming Languages", "Perl", "Family of programming languages for text processing"),
    ("Transform", "ETL Tools", "Apache Spark", "Unified analytics engine for large-scale data processing"),
    ("Transform", "ETL Tools", "Snowflake", "Cloud-based data warehousing platform"),
];

/// Build the default dataset.
///
/// Normal connections link each stage to the next and close the cycle from
/// the last stage back to the first.
pub fn default_dataset() -> LifecycleData {
    let stages: Vec<Stage> = STAGES
        .iter()
        .map(|(name, description, color)| Stage {
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
        })
        .collect();

    let mut connections: Vec<Connection> = stages
        .iter()
        .zip(stages.iter().cycle().skip(1))
        .map(|(from, to)| Connection {
            from: from.name.clone(),
            to: to.name.clone(),
            kind: ConnectionType::Normal,
        })
        .collect();

    connections.extend(ALTERNATIVE_CONNECTIONS.iter().map(|(from, to)| Connection {
        from: from.to_string(),
        to: to.to_string(),
        kind: ConnectionType::Alternative,
    }));

    let exemplars = EXEMPLARS
        .iter()
        .map(|(stage, category, name, description)| Exemplar {
            stage: stage.to_string(),
            category: category.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect();

    LifecycleData {
        stages,
        connections,
        exemplars,
    }
}
