//! Sample posts inserted by the seed endpoint.

use crate::models::BlogPostInput;

struct SamplePost {
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
    read_time: &'static str,
    image: &'static str,
}

const SAMPLES: &[SamplePost] = &[
    SamplePost {
        title: "The Future of Data Analytics: Trends to Watch in 2025",
        excerpt: "Exploring the latest trends in data analytics, from AI-powered insights to real-time processing and predictive modeling that will shape the industry.",
        content: r#"<p>The data analytics landscape is evolving rapidly, with several key trends emerging that will define how we handle and interpret data in 2025 and beyond.</p>
<h3>AI-Powered Analytics</h3>
<p>Machine learning models now surface patterns that would take analysts weeks to find, and analytics platforms are putting that capability in front of non-technical users.</p>
<h3>Real-Time Processing</h3>
<p>Decisions increasingly depend on current data rather than historical reports. Streaming platforms and real-time warehouses make instant analytics practical.</p>
<h3>Predictive Modeling</h3>
<p>Forecasting is moving from specialist teams into everyday tooling, from supply chain optimization to customer behavior prediction.</p>
<h3>Data Democratization</h3>
<p>Self-service tools let business users explore data on their own, easing the load on data teams and raising data literacy across the organization.</p>"#,
        tags: &["Data Analytics", "AI", "Machine Learning", "Trends"],
        read_time: "5 min read",
        image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=800",
    },
    SamplePost {
        title: "Building Effective BI Dashboards: A Practitioner's Guide",
        excerpt: "Learn how to create compelling business intelligence dashboards that drive decision-making and deliver measurable business value.",
        content: r#"<p>Creating effective BI dashboards is both an art and a science. These are the lessons that held up across dozens of dashboards in different industries.</p>
<h3>Know Your Audience</h3>
<p>Start from who will use the dashboard and which decisions they need to make. Different stakeholders need different levels of detail.</p>
<h3>Keep It Simple</h3>
<p>Focus on the indicators that matter. A cluttered dashboard is worse than no dashboard at all.</p>
<h3>Design for Action</h3>
<p>Every visualization should lead to a potential action. If it doesn't, remove it.</p>
<h3>Performance Matters</h3>
<p>A slow dashboard is an unused dashboard. Optimize queries, aggregate sensibly and pick refresh schedules that balance freshness with speed.</p>"#,
        tags: &["BI", "Dashboards", "Data Visualization", "Best Practices"],
        read_time: "7 min read",
        image: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800",
    },
    SamplePost {
        title: "SQL Optimization Techniques That Saved Me Hours",
        excerpt: "Discover practical SQL optimization strategies that can dramatically improve query performance and reduce processing time.",
        content: r#"<p>Years of working with large datasets turned up a handful of SQL techniques that repeatedly cut processing time.</p>
<h3>Index Strategy</h3>
<p>Index the columns used in WHERE clauses, JOIN conditions and ORDER BY statements.</p>
<h3>Query Structure</h3>
<p>Use subqueries judiciously, avoid unnecessary DISTINCT clauses and reach for window functions where they fit.</p>
<h3>Partitioning Large Tables</h3>
<p>Partitioning lets the database skip irrelevant data entirely on very large tables.</p>
<h3>Query Execution Plans</h3>
<p>Read the execution plan before guessing. It shows exactly where the time goes.</p>"#,
        tags: &["SQL", "Database", "Performance", "Optimization"],
        read_time: "6 min read",
        image: "https://images.unsplash.com/photo-1544383835-bda2bc66a55d?w=800",
    },
];

/// The sample posts, all published
pub fn sample_posts() -> Vec<BlogPostInput> {
    SAMPLES
        .iter()
        .map(|sample| BlogPostInput {
            title: sample.title.to_string(),
            excerpt: sample.excerpt.to_string(),
            content: sample.content.to_string(),
            tags: sample.tags.iter().map(|t| t.to_string()).collect(),
            read_time: sample.read_time.to_string(),
            image: sample.image.to_string(),
            is_published: true,
        })
        .collect()
}
