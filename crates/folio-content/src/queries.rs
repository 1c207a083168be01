//! GraphQL queries sent to the content store.
//!
//! Each query selects every field the page renderers read. Nested
//! collections are capped server-side with `limit: COLLECTION_LIMIT`.

/// Upper bound on related skills and gallery images fetched per project.
pub const COLLECTION_LIMIT: usize = 15;

/// All skills, for the home page and the backend panel.
pub const SKILLS_QUERY: &str = r#"{
  skillsCollection {
    items {
      slug
      name
      usage
      image {
        url
      }
    }
  }
}
"#;

/// All portfolio entries, for route enumeration and the portfolio index.
pub const PORTFOLIO_LIST_QUERY: &str = r#"{
  portfolioCollection {
    items {
      order
      slug
      name
      image {
        url
      }
    }
  }
}
"#;

/// One portfolio entry with its relations. Takes `$slug`.
pub const PORTFOLIO_ITEM_QUERY: &str = r#"query GetPortfolioItem($slug: String!) {
  portfolioCollection(where: { slug: $slug }, limit: 1) {
    items {
      order
      slug
      name
      description {
        json
      }
      image {
        title
        description
        contentType
        fileName
        size
        url
        width
        height
      }
      liveUrl
      githubUrl
      relatedSkillsCollection(limit: 15) {
        items {
          ... on Skills {
            name
            slug
            image {
              url
            }
          }
        }
      }
      galleryCollection(limit: 15) {
        items {
          title
          fileName
          url
        }
      }
      relatedExperience {
        ... on Experience {
          name
          slug
          image {
            url
          }
        }
      }
    }
  }
}
"#;

/// Name of the variable `PORTFOLIO_ITEM_QUERY` expects.
pub const SLUG_VARIABLE: &str = "slug";
