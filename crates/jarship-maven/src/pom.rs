//! POM metadata: derivation from project configuration and XML rendering.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use jarship_core::manifest::Manifest;
use jarship_util::errors::{JarshipError, JarshipResult};

use crate::publication::Coordinates;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd";

/// Descriptive metadata of a publication, as it appears in the POM.
///
/// Derived only from configuration, never from artifact contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub display_name: String,
    pub description: String,
    pub project_url: String,
    pub license: Option<License>,
    pub developers: Vec<Developer>,
    pub scm: Scm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Developer {
    pub name: String,
    pub email: String,
}

/// Source control coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scm {
    pub url: String,
    pub connection: String,
    pub developer_connection: String,
}

/// Build publication metadata from the project configuration.
///
/// With `projectUrl = author-url + "/" + name`, the URLs are plain
/// concatenations: `https://{projectUrl}` for the site,
/// `https://{projectUrl}/tree/main` for browsing, and
/// `scm:git:git://` / `scm:git:ssh://` + `{projectUrl}.git` for the
/// connections. No normalisation is applied to `author-url`.
pub fn build_metadata(manifest: &Manifest) -> JarshipResult<Metadata> {
    let project = &manifest.project;
    if project.name.is_empty() {
        return Err(JarshipError::IncompleteConfig {
            field: "project.name".to_string(),
        });
    }
    if project.author_url.is_empty() {
        return Err(JarshipError::IncompleteConfig {
            field: "project.author-url".to_string(),
        });
    }

    let project_url = format!("{}/{}", project.author_url, project.name);

    Ok(Metadata {
        display_name: project
            .display_name
            .clone()
            .unwrap_or_else(|| project.name.clone()),
        description: project.description.clone().unwrap_or_default(),
        project_url: format!("https://{project_url}"),
        license: manifest.license.as_ref().map(|l| License {
            name: l.name.clone(),
            url: l.url.clone(),
        }),
        developers: manifest
            .developers
            .iter()
            .map(|d| Developer {
                name: d.name.clone(),
                email: d.email.clone(),
            })
            .collect(),
        scm: Scm {
            url: format!("https://{project_url}/tree/main"),
            connection: format!("scm:git:git://{project_url}.git"),
            developer_connection: format!("scm:git:ssh://{project_url}.git"),
        },
    })
}

/// Render a Maven 4.0.0 POM for the given coordinates and metadata.
///
/// Output is deterministic: identical input yields byte-identical XML.
/// Empty optional values (description, license URL, developer email) are
/// omitted rather than written as empty elements.
pub fn render_pom(coordinates: &Coordinates, metadata: &Metadata) -> JarshipResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    let mut project = BytesStart::new("project");
    project.push_attribute(("xmlns", POM_NAMESPACE));
    project.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    project.push_attribute(("xsi:schemaLocation", POM_SCHEMA_LOCATION));
    write(&mut writer, Event::Start(project))?;

    text_element(&mut writer, "modelVersion", "4.0.0")?;
    text_element(&mut writer, "groupId", &coordinates.group)?;
    text_element(&mut writer, "artifactId", &coordinates.artifact_id)?;
    text_element(&mut writer, "version", &coordinates.version)?;
    text_element(&mut writer, "name", &metadata.display_name)?;
    optional_element(&mut writer, "description", &metadata.description)?;
    text_element(&mut writer, "url", &metadata.project_url)?;

    if let Some(ref license) = metadata.license {
        start(&mut writer, "licenses")?;
        start(&mut writer, "license")?;
        text_element(&mut writer, "name", &license.name)?;
        optional_element(&mut writer, "url", &license.url)?;
        end(&mut writer, "license")?;
        end(&mut writer, "licenses")?;
    }

    if !metadata.developers.is_empty() {
        start(&mut writer, "developers")?;
        for developer in &metadata.developers {
            start(&mut writer, "developer")?;
            text_element(&mut writer, "name", &developer.name)?;
            optional_element(&mut writer, "email", &developer.email)?;
            end(&mut writer, "developer")?;
        }
        end(&mut writer, "developers")?;
    }

    start(&mut writer, "scm")?;
    text_element(&mut writer, "connection", &metadata.scm.connection)?;
    text_element(
        &mut writer,
        "developerConnection",
        &metadata.scm.developer_connection,
    )?;
    text_element(&mut writer, "url", &metadata.scm.url)?;
    end(&mut writer, "scm")?;

    end(&mut writer, "project")?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(|e| JarshipError::Generic {
        message: format!("POM is not valid UTF-8: {e}"),
    })?;
    xml.push('\n');
    Ok(xml)
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> JarshipResult<()> {
    writer
        .write_event(event)
        .map_err(|e| JarshipError::Generic {
            message: format!("Failed to write POM: {e}"),
        })
}

fn start(writer: &mut Writer<Vec<u8>>, name: &str) -> JarshipResult<()> {
    write(writer, Event::Start(BytesStart::new(name)))
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> JarshipResult<()> {
    write(writer, Event::End(BytesEnd::new(name)))
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> JarshipResult<()> {
    start(writer, name)?;
    write(writer, Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn optional_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> JarshipResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    text_element(writer, name, text)
}
